//! Static hero banner and page footer

use chrono::{Datelike, Utc};

use crate::scene::{SceneRenderer, SceneView};

pub const HERO_TITLE: &str = "F1 Live Hub";
pub const HERO_TAGLINE: &str = concat!(
    "Live driver profiles, upcoming Grands Prix, race results, ",
    "and immersive 3D car visuals in one dashboard."
);
/// Second footer line
pub const HERO_DATA_NOTE: &str = "Data updates automatically from the connected API.";
pub const HERO_SCENE_URL: &str = "https://prod.spline.design/4Tf9WOIaWs6LOezG/scene.splinecode";

/// Static banner at the top of the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    pub title: &'static str,
    pub tagline: &'static str,
    pub note: &'static str,
    pub scene: SceneView,
}

impl Hero {
    pub fn new(renderer: &dyn SceneRenderer) -> Self {
        Self {
            title: HERO_TITLE,
            tagline: HERO_TAGLINE,
            note: HERO_DATA_NOTE,
            scene: renderer.render(Some(HERO_SCENE_URL), "Hero scene not available."),
        }
    }

    pub fn footer(&self) -> String {
        format!("© {} {}. Unofficial fan project.", Utc::now().year(), self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::LinkRenderer;

    #[test]
    fn test_hero_embeds_scene() {
        let hero = Hero::new(&LinkRenderer);
        assert_eq!(hero.title, "F1 Live Hub");
        assert_eq!(
            hero.scene,
            SceneView::Embedded {
                url: HERO_SCENE_URL.to_string()
            }
        );
        assert!(hero.footer().contains("Unofficial fan project."));
        assert_eq!(hero.note, "Data updates automatically from the connected API.");
    }
}
