//! Screen state machine
//!
//! The game is either on the title menu or playing. Transitions are looked
//! up in a fixed table; events with no entry leave the screen unchanged.

/// Active screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Menu,
    Game,
}

/// Requests that can change the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    Start,
    Back,
    /// Escape or window close
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    To(Screen),
    Exit,
}

const TRANSITIONS: [(Screen, ScreenEvent, Transition); 4] = [
    (Screen::Menu, ScreenEvent::Start, Transition::To(Screen::Game)),
    (Screen::Menu, ScreenEvent::Quit, Transition::Exit),
    (Screen::Game, ScreenEvent::Back, Transition::To(Screen::Menu)),
    (Screen::Game, ScreenEvent::Quit, Transition::Exit),
];

impl Screen {
    /// Where `event` leads from this screen, if anywhere
    pub fn next(self, event: ScreenEvent) -> Option<Transition> {
        TRANSITIONS
            .iter()
            .find(|(from, on, _)| *from == self && *on == event)
            .map(|(_, _, to)| *to)
    }

    /// Whether this screen runs the simulation and level rendering
    pub fn is_playing(self) -> bool {
        self == Screen::Game
    }
}
