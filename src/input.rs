use crate::model::Scene;
use crate::sim::Command;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Clone, Debug)]
pub(crate) struct InputEvent {
    pub(crate) key: KeyCode,
    pub(crate) mods: KeyModifiers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UiAction {
    Pet(Command),
    AskReset,
    ConfirmReset,
    CancelReset,
    HelpToggle,
    Dismiss,
    Quit,
}

pub(crate) fn collect_input_nonblocking(max_frame_time: Duration) -> anyhow::Result<Vec<InputEvent>> {
    let mut out = Vec::new();

    // poll with a tiny timeout so we stay responsive
    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        if let Event::Key(k) = event::read()? {
            if k.kind == KeyEventKind::Press {
                out.push(InputEvent {
                    key: k.code,
                    mods: k.modifiers,
                });
                if out.len() >= 32 {
                    break;
                }
            }
        }
    }
    Ok(out)
}

pub(crate) fn map_event_to_action(scene: &Scene, ev: InputEvent) -> Option<UiAction> {
    if ev.mods.contains(KeyModifiers::CONTROL) {
        return match ev.key {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(UiAction::Quit),
            _ => None,
        };
    }

    // the confirmation owns the keyboard until answered
    if matches!(scene, Scene::ConfirmReset) {
        return match ev.key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                Some(UiAction::ConfirmReset)
            }
            _ => Some(UiAction::CancelReset),
        };
    }

    match ev.key {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Some(UiAction::Quit),
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
            return Some(UiAction::HelpToggle)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => return Some(UiAction::AskReset),
        _ => {}
    }

    match scene {
        Scene::Main => match ev.key {
            KeyCode::Char('f') | KeyCode::Char('F') => Some(UiAction::Pet(Command::Feed)),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(UiAction::Pet(Command::Play)),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(UiAction::Pet(Command::ToggleSleep)),
            KeyCode::Char('c') | KeyCode::Char('C') => Some(UiAction::Pet(Command::Clean)),
            _ => None,
        },
        Scene::Help => match ev.key {
            KeyCode::Esc => Some(UiAction::Dismiss),
            _ => None,
        },
        // any key continues
        Scene::Recap(_) => Some(UiAction::Dismiss),
        Scene::Dead | Scene::ConfirmReset => None,
    }
}
