#![forbid(unsafe_code)]

//! Recorded event scripts for deterministic replay.
//!
//! A host can record the [`PageEvent`] stream it feeds a live controller and
//! later replay it against a fresh one; equal scripts produce equal command
//! sequences. Tests use the same mechanism to drive the controller with
//! synthetic visibility batches and no real rendering host.

use serde::{Deserialize, Serialize};

use crate::controller::NavController;
use crate::event::{NavCommand, PageEvent};

/// A recorded sequence of host events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventScript {
    /// Events in delivery order.
    pub steps: Vec<PageEvent>,
}

impl EventScript {
    /// Create an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event.
    pub fn push(&mut self, event: PageEvent) {
        self.steps.push(event);
    }

    /// Parse a script from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the script to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Feed every step through `controller`, concatenating the emitted
    /// commands.
    pub fn run(&self, controller: &mut NavController) -> Vec<NavCommand> {
        let mut commands = Vec::new();
        for step in &self.steps {
            commands.extend(controller.handle(step));
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::ViewportBand;
    use crate::event::VisibilityRecord;
    use crate::page::PageMap;
    use pretty_assertions::assert_eq;

    fn controller() -> NavController {
        let mut page = PageMap::new();
        for id in ["home", "about"] {
            page.push_section(id);
            page.push_link(Some(id.into()), Some(id.into()));
        }
        NavController::new(page, ViewportBand::default())
    }

    fn sample_script() -> EventScript {
        let mut script = EventScript::new();
        script.push(PageEvent::LinkActivated { link: 1 });
        script.push(PageEvent::Visibility {
            records: vec![VisibilityRecord::entered(1, 0.6)],
        });
        script.push(PageEvent::LogoActivated);
        script
    }

    #[test]
    fn json_round_trip_preserves_the_script() {
        let script = sample_script();
        let json = script.to_json().unwrap();
        let back = EventScript::from_json(&json).unwrap();
        assert_eq!(back, script);
    }

    #[test]
    fn replay_emits_the_expected_command_sequence() {
        let mut nav = controller();
        nav.initialize();

        let commands = sample_script().run(&mut nav);
        assert_eq!(
            commands,
            vec![
                NavCommand::ScrollTo { section: 1 },
                NavCommand::MarkActive { link: 1 },
                NavCommand::ScrollTo { section: 0 },
            ]
        );
    }

    #[test]
    fn equal_scripts_replay_identically() {
        let script = sample_script();

        let mut first = controller();
        first.initialize();
        let mut second = controller();
        second.initialize();

        assert_eq!(script.run(&mut first), script.run(&mut second));
        assert_eq!(first.active_link(), second.active_link());
    }
}
