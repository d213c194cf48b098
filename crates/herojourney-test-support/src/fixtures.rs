//! Content fixtures: small nodes and catalogs built in code.

use std::sync::Arc;

use herojourney_character::domain::stats::StatType;
use herojourney_content::domain::catalog::ContentCatalog;
use herojourney_content::domain::nodes::{
    ContentNode, DifficultyTier, Outcome, OutcomeEffects, StatRequirements,
};

/// A zero-requirement outcome with no effects beyond its result text.
#[must_use]
pub fn catch_all(description: &str, difficulty: DifficultyTier) -> Outcome {
    Outcome {
        description: description.to_owned(),
        requirements: StatRequirements::default(),
        effects: OutcomeEffects {
            result_text: format!("{description} happened."),
            ..OutcomeEffects::default()
        },
        unlocks_nodes: Vec::new(),
        locks_nodes: Vec::new(),
        priority: 100,
        difficulty,
    }
}

/// An outcome requiring `minimum` effective `stat`, evaluated at `priority`.
#[must_use]
pub fn gated(
    description: &str,
    stat: StatType,
    minimum: i32,
    priority: i32,
    difficulty: DifficultyTier,
) -> Outcome {
    Outcome {
        requirements: StatRequirements::default().with(stat, minimum),
        priority,
        ..catch_all(description, difficulty)
    }
}

/// Fluent builder for `ContentNode`.
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    node: ContentNode,
}

impl NodeBuilder {
    /// Start a repeatable, initially available node in category `general`.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            node: ContentNode {
                id: id.to_owned(),
                title: format!("Title of {id}"),
                description: format!("Description of {id}"),
                category: "general".to_owned(),
                initially_locked: false,
                repeatable: true,
                outcomes: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn category(mut self, category: &str) -> Self {
        self.node.category = category.to_owned();
        self
    }

    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.node.title = title.to_owned();
        self
    }

    /// Start in the locked set.
    #[must_use]
    pub fn locked(mut self) -> Self {
        self.node.initially_locked = true;
        self
    }

    /// Retire after it is played once.
    #[must_use]
    pub fn one_shot(mut self) -> Self {
        self.node.repeatable = false;
        self
    }

    #[must_use]
    pub fn outcome(mut self, outcome: Outcome) -> Self {
        self.node.outcomes.push(outcome);
        self
    }

    /// Finish the node. A node with no outcomes gets one EASY catch-all.
    #[must_use]
    pub fn build(mut self) -> ContentNode {
        if self.node.outcomes.is_empty() {
            self.node.outcomes.push(catch_all("Carry on", DifficultyTier::Easy));
        }
        self.node
    }
}

/// A single-outcome node of `tier` in `category`.
#[must_use]
pub fn simple_node(id: &str, category: &str, tier: DifficultyTier) -> ContentNode {
    NodeBuilder::new(id)
        .category(category)
        .outcome(catch_all("Carry on", tier))
        .build()
}

/// Wrap `nodes` in a shared catalog.
#[must_use]
pub fn catalog_of(nodes: impl IntoIterator<Item = ContentNode>) -> Arc<ContentCatalog> {
    Arc::new(ContentCatalog::new(nodes))
}

/// Eight EASY nodes across four categories, two per category.
#[must_use]
pub fn varied_catalog() -> Arc<ContentCatalog> {
    let categories = ["combat", "social", "magic", "commerce"];
    catalog_of(categories.iter().flat_map(|category| {
        (1..=2).map(move |n| simple_node(&format!("{category}_{n}"), category, DifficultyTier::Easy))
    }))
}
