//! Creating a hero for a new playthrough.

use tracing::{info, warn};

use crate::domain::backgrounds::{HeroBackground, background_by_id, default_background};
use crate::domain::stats::StatBlock;

/// A freshly created hero.
#[derive(Debug, Clone)]
pub struct NewHero {
    /// The background the hero was built from.
    pub background: &'static HeroBackground,
    /// Starting attributes.
    pub stats: StatBlock,
}

/// Creates a hero from the background with `background_id`.
///
/// An unknown id falls back to the default background rather than failing,
/// so a stale menu selection never blocks a new playthrough.
#[must_use]
pub fn create_hero(background_id: Option<&str>) -> NewHero {
    let background = match background_id {
        Some(id) => background_by_id(id).unwrap_or_else(|| {
            warn!(background_id = id, "unknown background, using default");
            default_background()
        }),
        None => default_background(),
    };

    info!(background_id = background.id, "creating hero");

    NewHero {
        background,
        stats: background.initial_stats(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backgrounds::DEFAULT_BACKGROUND_ID;
    use crate::domain::stats::StatType;

    #[test]
    fn test_create_hero_uses_requested_background() {
        let hero = create_hero(Some("magical_academy_orphan"));
        assert_eq!(hero.background.id, "magical_academy_orphan");
        assert_eq!(hero.stats.power(StatType::Magical), 25);
        assert_eq!(hero.stats.insight(), 20);
    }

    #[test]
    fn test_create_hero_unknown_background_falls_back_to_default() {
        let hero = create_hero(Some("does_not_exist"));
        assert_eq!(hero.background.id, DEFAULT_BACKGROUND_ID);
        assert_eq!(hero.stats, StatBlock::new());
    }

    #[test]
    fn test_create_hero_without_background_uses_default() {
        let hero = create_hero(None);
        assert_eq!(hero.background.id, DEFAULT_BACKGROUND_ID);
    }
}
