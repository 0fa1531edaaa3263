use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::snake::Direction::{self, *};
use crate::{Coords, TermInt};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Restart,
    TogglePause,
    Quit,
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Maps a key press to a command. Releases, repeats and unknown keys give `None`.
pub fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if is_ctrl_c(key) {
        return Some(Command::Quit);
    }

    let command = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Turn(Up),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Turn(Left),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::Turn(Down),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::Turn(Right),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Command::Restart,
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Command::TogglePause,
        KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        _ => return None,
    };

    Some(command)
}

/// A clickable label on screen, one row tall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub top_left: Coords,
    pub command: Command,
}

impl Button {
    pub fn width(&self) -> TermInt {
        self.label.chars().count() as TermInt
    }

    pub fn contains(&self, column: TermInt, row: TermInt) -> bool {
        let (x, y) = self.top_left;
        row == y && column >= x && column < x + self.width()
    }
}

/// The on-screen directional pad plus the restart button shown after a game ends.
///
/// ```text
///        [ ^ ]
///  [ < ]       [ > ]
///        [ v ]
///    [ Restart ]
/// ```
pub struct Controls {
    pad: Vec<Button>,
    restart: Button,
}

impl Controls {
    pub const HEIGHT: TermInt = 4;
    pub const WIDTH: TermInt = 17;

    pub fn new(top_left: Coords) -> Self {
        let (x, y) = top_left;
        let pad = vec![
            Button { label: "[ ^ ]", top_left: (x + 6, y), command: Command::Turn(Up) },
            Button { label: "[ < ]", top_left: (x, y + 1), command: Command::Turn(Left) },
            Button { label: "[ > ]", top_left: (x + 12, y + 1), command: Command::Turn(Right) },
            Button { label: "[ v ]", top_left: (x + 6, y + 2), command: Command::Turn(Down) },
        ];
        let restart = Button { label: "[ Restart ]", top_left: (x + 3, y + 3), command: Command::Restart };

        Controls { pad, restart }
    }

    pub fn pad(&self) -> &[Button] {
        &self.pad
    }

    pub fn restart(&self) -> &Button {
        &self.restart
    }

    /// The command under a click; the restart button only counts while it is shown.
    pub fn hit(&self, column: TermInt, row: TermInt, restart_shown: bool) -> Option<Command> {
        let restart = if restart_shown { Some(&self.restart) } else { None };

        self.pad.iter()
            .chain(restart)
            .find(|button| button.contains(column, row))
            .map(|button| button.command)
    }
}

/// Turns any terminal event into a command, or `None` if it means nothing to the game.
pub fn command_for_event(event: &Event, controls: &Controls, restart_shown: bool) -> Option<Command> {
    match event {
        Event::Key(key) => command_for_key(key),
        Event::Mouse(MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), column, row, .. }) => {
            controls.hit(*column, *row, restart_shown)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: TermInt, row: TermInt) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn controls() -> Controls {
        Controls::new((10, 30))
    }

    #[test]
    fn test_arrow_and_wasd_keys() {
        let c = controls();
        let cases = [
            (KeyCode::Up, Up),
            (KeyCode::Down, Down),
            (KeyCode::Left, Left),
            (KeyCode::Right, Right),
            (KeyCode::Char('w'), Up),
            (KeyCode::Char('S'), Down),
            (KeyCode::Char('a'), Left),
            (KeyCode::Char('D'), Right),
        ];

        for (code, dir) in cases.iter() {
            assert_eq!(command_for_event(&press(*code), &c, false), Some(Command::Turn(*dir)));
        }
    }

    #[test]
    fn test_control_keys() {
        let c = controls();

        assert_eq!(command_for_event(&press(KeyCode::Char('r')), &c, false), Some(Command::Restart));
        assert_eq!(command_for_event(&press(KeyCode::Enter), &c, false), Some(Command::Restart));
        assert_eq!(command_for_event(&press(KeyCode::Esc), &c, false), Some(Command::TogglePause));
        assert_eq!(command_for_event(&press(KeyCode::Char('q')), &c, false), Some(Command::Quit));

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(command_for_event(&ctrl_c, &c, false), Some(Command::Quit));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let c = controls();

        assert_eq!(command_for_event(&press(KeyCode::Char('x')), &c, false), None);
        assert_eq!(command_for_event(&press(KeyCode::Tab), &c, false), None);
        assert_eq!(command_for_event(&Event::Resize(80, 24), &c, false), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(command_for_key(&release), None);
    }

    #[test]
    fn test_clicks_on_pad() {
        let c = controls();

        assert_eq!(command_for_event(&click(16, 30), &c, false), Some(Command::Turn(Up)));
        assert_eq!(command_for_event(&click(20, 30), &c, false), Some(Command::Turn(Up)));
        assert_eq!(command_for_event(&click(10, 31), &c, false), Some(Command::Turn(Left)));
        assert_eq!(command_for_event(&click(22, 31), &c, false), Some(Command::Turn(Right)));
        assert_eq!(command_for_event(&click(18, 32), &c, false), Some(Command::Turn(Down)));

        // Gaps between buttons
        assert_eq!(command_for_event(&click(15, 30), &c, false), None);
        assert_eq!(command_for_event(&click(18, 31), &c, false), None);
    }

    #[test]
    fn test_restart_button_only_while_shown() {
        let c = controls();

        assert_eq!(command_for_event(&click(13, 33), &c, false), None);
        assert_eq!(command_for_event(&click(13, 33), &c, true), Some(Command::Restart));
        assert_eq!(command_for_event(&click(23, 33), &c, true), Some(Command::Restart));
        assert_eq!(command_for_event(&click(24, 33), &c, true), None);
    }

    #[test]
    fn test_right_click_is_ignored() {
        let c = controls();
        let right = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: 16,
            row: 30,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(command_for_event(&right, &c, false), None);
    }
}
