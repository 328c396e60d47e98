//! Render-ready status data and the seam towards the host's display teams.

use crate::color::ColorId;

const TEAM_PREFIX: &str = "status_";
const TEAM_ID_CHARS: usize = 8;

/// Resolved settings a presenter needs to decorate a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub status: String,
    pub color: ColorId,
    pub brackets: bool,
    pub before_name: bool,
}

impl StatusView {
    pub fn has_status(&self) -> bool {
        !self.status.is_empty()
    }
}

/// Applies resolved status settings to the host's display grouping.
///
/// Called after every change that affects rendered output. Adding or
/// removing the player from a team, and deleting empty teams, is up to the
/// implementation.
pub trait Presenter {
    fn present(&mut self, user_id: &str, view: &StatusView);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, user_id: &str, view: &StatusView) {
        (**self).present(user_id, view);
    }
}

/// Presenter that drops every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn present(&mut self, _user_id: &str, _view: &StatusView) {}
}

/// Prefix and suffix text for a display name, colored as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decoration {
    pub prefix: String,
    pub suffix: String,
    pub color: ColorId,
}

impl Decoration {
    pub fn from_view(view: &StatusView) -> Self {
        if !view.has_status() {
            return Self::default();
        }

        let label = if view.brackets {
            format!("[{}]", view.status)
        } else {
            view.status.clone()
        };

        if view.before_name {
            Self {
                prefix: format!("{label} "),
                suffix: String::new(),
                color: view.color,
            }
        } else {
            Self {
                prefix: String::new(),
                suffix: format!(" {label}"),
                color: view.color,
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }

    /// Decorate `name` using legacy `§` formatting codes.
    ///
    /// A reset color adds no codes.
    pub fn apply_legacy(&self, name: &str) -> String {
        if self.color.is_reset() {
            return format!("{}{name}{}", self.prefix, self.suffix);
        }

        let code = self.color.code();
        let mut out = String::new();
        if !self.prefix.is_empty() {
            out.push_str(&format!("§{code}{}§r", self.prefix));
        }
        out.push_str(name);
        if !self.suffix.is_empty() {
            out.push_str(&format!("§{code}{}§r", self.suffix));
        }
        out
    }
}

/// Name of the display team that carries a player's status.
pub fn team_name(user_id: &str) -> String {
    let short: String = user_id.chars().take(TEAM_ID_CHARS).collect();
    format!("{TEAM_PREFIX}{short}")
}
