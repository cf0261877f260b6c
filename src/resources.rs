//! Asset-group readiness tracking.
//!
//! Groups are declared with an expected asset count; when the count drains
//! to zero a one-shot `GroupEnd` event is queued for the driver to
//! dispatch. A group with zero assets finishes on declaration, which is how
//! this scene keeps the sequencing gate of a loader without owning any
//! real assets.

/// One-shot notification that a named asset group finished loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEnd {
    pub name: String,
}

struct Group {
    name: String,
    remaining: usize,
    finished: bool,
}

/// Named asset groups with a drainable completion-event queue.
#[derive(Default)]
pub struct Resources {
    groups: Vec<Group>,
    events: Vec<GroupEnd>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a group expecting `asset_count` loads. A zero-asset group
    /// finishes immediately.
    pub fn declare_group(&mut self, name: &str, asset_count: usize) {
        self.groups.push(Group {
            name: name.to_string(),
            remaining: asset_count,
            finished: false,
        });
        if asset_count == 0 {
            self.finish_group(name);
        }
    }

    /// Record one loaded asset for `group`, firing `GroupEnd` when the
    /// group drains.
    pub fn mark_loaded(&mut self, group: &str) {
        let drained = self
            .groups
            .iter_mut()
            .find(|g| g.name == group && !g.finished)
            .map(|g| {
                g.remaining = g.remaining.saturating_sub(1);
                g.remaining == 0
            })
            .unwrap_or(false);

        if drained {
            self.finish_group(group);
        }
    }

    /// Queue the group's end event. Fires at most once per group; unknown
    /// names are ignored.
    pub fn finish_group(&mut self, name: &str) {
        let Some(group) = self.groups.iter_mut().find(|g| g.name == name) else {
            return;
        };
        if group.finished {
            return;
        }
        group.finished = true;
        self.events.push(GroupEnd {
            name: name.to_string(),
        });
    }

    /// Take all pending completion events, in firing order.
    pub fn drain_events(&mut self) -> Vec<GroupEnd> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_group_finishes_on_declaration() {
        let mut resources = Resources::new();
        resources.declare_group("base", 0);

        let events = resources.drain_events();
        assert_eq!(events, vec![GroupEnd { name: "base".into() }]);
        assert!(resources.drain_events().is_empty());
    }

    #[test]
    fn test_group_finishes_after_last_asset() {
        let mut resources = Resources::new();
        resources.declare_group("textures", 2);

        resources.mark_loaded("textures");
        assert!(resources.drain_events().is_empty());

        resources.mark_loaded("textures");
        let events = resources.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "textures");
    }

    #[test]
    fn test_group_end_fires_once() {
        let mut resources = Resources::new();
        resources.declare_group("base", 0);
        resources.finish_group("base");
        resources.mark_loaded("base");

        assert_eq!(resources.drain_events().len(), 1);
    }

    #[test]
    fn test_unknown_group_is_ignored() {
        let mut resources = Resources::new();
        resources.finish_group("missing");
        resources.mark_loaded("missing");
        assert!(resources.drain_events().is_empty());
    }
}
