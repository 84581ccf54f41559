//! 3D scene capability
//!
//! The renderer itself is external. Views hand it an optional scene URL and
//! get back either an embeddable scene or an "unavailable" placeholder.

/// Hint shown under every unavailable scene
pub const UNAVAILABLE_HINT: &str = "Select another driver or add a Spline URL via the API.";

/// What a view should display in a scene slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneView {
    Embedded { url: String },
    Unavailable { label: String },
}

/// Renders a scene URL into something a frontend can show
pub trait SceneRenderer: Send + Sync {
    /// `fallback` is the label used when `scene_url` is absent or empty
    fn render(&self, scene_url: Option<&str>, fallback: &str) -> SceneView;
}

/// Renderer for frontends that can only link to the scene
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkRenderer;

impl SceneRenderer for LinkRenderer {
    fn render(&self, scene_url: Option<&str>, fallback: &str) -> SceneView {
        match scene_url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => SceneView::Embedded {
                url: url.to_string(),
            },
            None => SceneView::Unavailable {
                label: fallback.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_renderer() {
        let url = "https://prod.spline.design/x/scene.splinecode";
        assert_eq!(LinkRenderer.render(Some(url), "none"), SceneView::Embedded { url: url.into() });

        let view = LinkRenderer.render(Some("  "), "Car 3D model not available.");
        assert_eq!(
            view,
            SceneView::Unavailable {
                label: "Car 3D model not available.".into()
            }
        );
        assert!(matches!(
            LinkRenderer.render(None, "x"),
            SceneView::Unavailable { .. }
        ));
    }
}
