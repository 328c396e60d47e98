use std::collections::{BTreeMap, BTreeSet};

use statusmod_engine::{Decoration, Presenter, StatusView, team_name};

/// Display team carrying one player's status decoration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Team {
    decoration: Decoration,
    members: BTreeSet<String>,
}

impl Team {
    pub(crate) fn decoration(&self) -> &Decoration {
        &self.decoration
    }
}

/// In-memory stand-in for the game's scoreboard teams.
///
/// A player with a status is (re)added to their team with fresh
/// prefix/suffix. Clearing the status removes the player and deletes the
/// team once it is empty.
#[derive(Debug, Default)]
pub(crate) struct Scoreboard {
    teams: BTreeMap<String, Team>,
}

impl Scoreboard {
    pub(crate) fn team(&self, name: &str) -> Option<&Team> {
        self.teams.get(name)
    }

    /// Display name of `user_id` as other players would see it.
    pub(crate) fn display_name(&self, user_id: &str) -> String {
        match self.team(&team_name(user_id)) {
            Some(team) if team.members.contains(user_id) => {
                team.decoration().apply_legacy(user_id)
            },
            _ => user_id.to_string(),
        }
    }

    fn leave(&mut self, team: &str, user_id: &str) {
        let Some(entry) = self.teams.get_mut(team) else {
            return;
        };
        entry.members.remove(user_id);
        if entry.members.is_empty() {
            self.teams.remove(team);
            log::debug!("removed empty team {team}");
        }
    }
}

impl Presenter for Scoreboard {
    fn present(&mut self, user_id: &str, view: &StatusView) {
        let name = team_name(user_id);
        let decoration = Decoration::from_view(view);
        if decoration.is_empty() {
            self.leave(&name, user_id);
            return;
        }

        let team = self.teams.entry(name.clone()).or_default();
        team.decoration = decoration;
        team.members.insert(user_id.to_string());
        log::debug!(
            "team {name}: prefix {:?}, suffix {:?}, color {}",
            team.decoration.prefix,
            team.decoration.suffix,
            team.decoration.color
        );
    }
}
