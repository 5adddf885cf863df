//! Behavioural properties of the session controller, driven through fake
//! collaborators.

use tui_flappy::core::{
    GameController, Impact, InputFrame, LevelLayout, MessageSurface, Mode, PhysicsWorld,
    SessionObserver,
};
use tui_flappy::types::{
    Message, Rect, Vec2, ACTOR_SPAWN, ASCEND_VELOCITY_Y, FLIGHT_SPEED_X, TICK_MS,
    WIN_DESCENT_VELOCITY_Y,
};

#[derive(Debug, Clone, Copy)]
enum Contact {
    Ground,
    Obstacle,
}

/// Records commands and replays scripted contacts on the next step.
#[derive(Default)]
struct FakeWorld {
    position: Vec2,
    velocity_x: Option<f32>,
    velocity_y: Option<f32>,
    builds: u32,
    contacts: Vec<Contact>,
}

impl FakeWorld {
    fn clear_commands(&mut self) {
        self.velocity_x = None;
        self.velocity_y = None;
    }
}

impl PhysicsWorld for FakeWorld {
    fn build(&mut self, layout: &LevelLayout) {
        self.position = layout.spawn;
        self.builds += 1;
        self.contacts.clear();
        self.clear_commands();
    }

    fn step(&mut self, _dt_ms: u32, observer: &mut dyn SessionObserver) {
        self.clear_commands();
        for contact in self.contacts.drain(..) {
            match contact {
                Contact::Ground => observer.on_ground_contact(),
                Contact::Obstacle => observer.on_obstacle_contact(),
            }
        }
    }

    fn actor_position(&self) -> Vec2 {
        self.position
    }

    fn actor_bounds(&self) -> Rect {
        Rect::from_center(self.position, Vec2::new(64.0, 96.0))
    }

    fn set_actor_velocity_x(&mut self, vx: f32) {
        self.velocity_x = Some(vx);
    }

    fn set_actor_velocity_y(&mut self, vy: f32) {
        self.velocity_y = Some(vy);
    }
}

#[derive(Default)]
struct Surface {
    text: String,
    writes: u32,
}

impl MessageSurface for Surface {
    fn set_message(&mut self, text: &str) {
        self.text = text.to_string();
        self.writes += 1;
    }
}

const IDLE: InputFrame = InputFrame {
    ascend: false,
    start: false,
};
const START: InputFrame = InputFrame {
    ascend: false,
    start: true,
};
const ALL_INPUTS: [InputFrame; 4] = [
    IDLE,
    START,
    InputFrame {
        ascend: true,
        start: false,
    },
    InputFrame {
        ascend: true,
        start: true,
    },
];

fn setup() -> (GameController, FakeWorld, Surface) {
    let mut controller = GameController::new(LevelLayout::standard());
    let mut world = FakeWorld::default();
    let mut surface = Surface::default();
    controller.initialize(&mut world, &mut surface);
    (controller, world, surface)
}

fn running() -> (GameController, FakeWorld, Surface) {
    let (mut c, mut w, mut s) = setup();
    c.frame(&mut w, &START, &mut s, TICK_MS);
    assert_eq!(c.session().mode(), Mode::Running);
    (c, w, s)
}

#[test]
fn initialize_builds_world_and_shows_start_prompt() {
    let (c, w, s) = setup();
    assert_eq!(w.builds, 1);
    assert_eq!(w.position, ACTOR_SPAWN);
    assert_eq!(s.text, Message::StartPrompt.text());
    assert!(!c.session().is_game_started());
    assert!(!c.session().has_landed());
    assert!(!c.session().has_bumped());
}

#[test]
fn flying_without_contacts_moves_at_flight_speed() {
    let (mut c, mut w, mut s) = running();
    for input in ALL_INPUTS.iter().cycle().take(40) {
        c.frame(&mut w, input, &mut s, TICK_MS);
        assert_eq!(w.velocity_x, Some(FLIGHT_SPEED_X));
    }
}

#[test]
fn landed_or_bumped_forces_zero_horizontal_regardless_of_input() {
    for contact in [Contact::Ground, Contact::Obstacle] {
        let (mut c, mut w, mut s) = running();
        w.contacts.push(contact);
        for input in ALL_INPUTS {
            c.frame(&mut w, &input, &mut s, TICK_MS);
            assert_eq!(w.velocity_x, Some(0.0), "{contact:?} {input:?}");
            assert_eq!(w.velocity_y, None, "gravity only after a crash");
        }
    }
}

#[test]
fn hovers_every_frame_until_started() {
    let (mut c, mut w, mut s) = setup();
    for _ in 0..30 {
        c.frame(&mut w, &IDLE, &mut s, TICK_MS);
        assert_eq!(w.velocity_y, Some(ASCEND_VELOCITY_Y));
        assert_eq!(w.velocity_x, Some(0.0));
    }
    // Ascend before the start changes nothing.
    let ascend = InputFrame {
        ascend: true,
        start: false,
    };
    c.frame(&mut w, &ascend, &mut s, TICK_MS);
    assert_eq!(w.velocity_y, Some(ASCEND_VELOCITY_Y));
    assert!(!c.session().is_game_started());
}

#[test]
fn contacts_before_start_still_hover_then_crash_on_start() {
    for contact in [Contact::Ground, Contact::Obstacle] {
        let (mut c, mut w, mut s) = setup();
        w.contacts.push(contact);
        for input in [IDLE, ALL_INPUTS[2], IDLE] {
            c.frame(&mut w, &input, &mut s, TICK_MS);
            assert_eq!(w.velocity_y, Some(ASCEND_VELOCITY_Y), "{contact:?} {input:?}");
            assert_eq!(w.velocity_x, Some(0.0), "{contact:?} {input:?}");
            assert!(!c.session().is_game_started());
        }
        assert!(c.session().has_landed() || c.session().has_bumped());

        c.frame(&mut w, &START, &mut s, TICK_MS);
        assert!(c.session().is_game_started());
        assert!(matches!(c.session().mode(), Mode::Crashed(_)));

        c.frame(&mut w, &IDLE, &mut s, TICK_MS);
        assert_eq!(w.velocity_x, Some(0.0), "{contact:?}");
        assert_eq!(s.text, Message::Crashed.text());
    }
}

#[test]
fn obstacle_after_win_stops_horizontal_motion() {
    let (mut c, mut w, mut s) = running();
    w.position = Vec2::new(760.0, 300.0);
    c.frame(&mut w, &IDLE, &mut s, TICK_MS);
    assert_eq!(w.velocity_x, Some(FLIGHT_SPEED_X));

    w.contacts.push(Contact::Obstacle);
    c.frame(&mut w, &IDLE, &mut s, TICK_MS);
    assert_eq!(c.session().mode(), Mode::Won(Impact::BUMPED));
    assert!(c.session().has_bumped());
    assert_eq!(w.velocity_x, Some(0.0));
    assert_eq!(w.velocity_y, Some(WIN_DESCENT_VELOCITY_Y));
    assert_eq!(s.text, Message::Won.text());
}

#[test]
fn start_sets_started_once() {
    let (mut c, mut w, mut s) = setup();
    c.frame(&mut w, &START, &mut s, TICK_MS);
    assert!(c.session().is_game_started());
    assert_eq!(s.text, Message::FlightInstructions.text());
    let writes = s.writes;

    for _ in 0..5 {
        c.frame(&mut w, &START, &mut s, TICK_MS);
        assert_eq!(c.session().mode(), Mode::Running);
    }
    assert_eq!(s.writes, writes, "repeated start must not rewrite the message");
}

#[test]
fn ground_contact_is_sticky_until_restart() {
    let (mut c, mut w, mut s) = running();
    w.contacts.push(Contact::Ground);
    c.frame(&mut w, &IDLE, &mut s, TICK_MS);
    assert!(c.session().has_landed());

    for _ in 0..10 {
        c.frame(&mut w, &START, &mut s, TICK_MS);
        assert!(c.session().has_landed());
    }

    w.position = Vec2::new(300.0, 500.0);
    c.on_restart_requested();
    c.frame(&mut w, &IDLE, &mut s, TICK_MS);
    assert!(!c.session().has_landed());
    assert_eq!(w.position, ACTOR_SPAWN);
    assert_eq!(w.builds, 2);
}

#[test]
fn obstacle_contact_crashes_on_next_frame() {
    let (mut c, mut w, mut s) = running();
    c.frame(&mut w, &IDLE, &mut s, TICK_MS);
    assert_eq!(w.velocity_x, Some(FLIGHT_SPEED_X));

    w.contacts.push(Contact::Obstacle);
    c.frame(&mut w, &IDLE, &mut s, TICK_MS);
    assert!(c.session().has_bumped());
    assert_eq!(w.velocity_x, Some(0.0));
    assert_eq!(s.text, Message::Crashed.text());
}

#[test]
fn passing_threshold_wins() {
    let (mut c, mut w, mut s) = running();
    w.position = Vec2::new(751.0, 300.0);
    c.frame(&mut w, &IDLE, &mut s, TICK_MS);

    assert_eq!(c.session().mode(), Mode::Won(Impact::NONE));
    assert_eq!(w.velocity_y, Some(WIN_DESCENT_VELOCITY_Y));
    assert_eq!(s.text, Message::Won.text());

    // Still descending on later frames, even with ascend held.
    let ascend = InputFrame {
        ascend: true,
        start: false,
    };
    c.frame(&mut w, &ascend, &mut s, TICK_MS);
    assert_eq!(w.velocity_y, Some(WIN_DESCENT_VELOCITY_Y));
}

#[test]
fn crash_beyond_threshold_does_not_turn_into_a_win() {
    let (mut c, mut w, mut s) = running();
    w.contacts.push(Contact::Obstacle);
    c.frame(&mut w, &IDLE, &mut s, TICK_MS);

    w.position = Vec2::new(800.0, 500.0);
    c.frame(&mut w, &IDLE, &mut s, TICK_MS);
    assert!(matches!(c.session().mode(), Mode::Crashed(_)));
    assert_eq!(s.text, Message::Crashed.text());
}

#[test]
fn restart_after_crash_resets_everything() {
    let (mut c, mut w, mut s) = running();
    w.contacts.push(Contact::Obstacle);
    w.contacts.push(Contact::Ground);
    c.frame(&mut w, &IDLE, &mut s, TICK_MS);
    assert!(c.session().has_bumped() && c.session().has_landed());
    let episode = c.session().episode_id();

    w.position = Vec2::new(420.0, 540.0);
    c.on_restart_requested();
    c.frame(&mut w, &IDLE, &mut s, TICK_MS);

    assert!(!c.session().is_game_started());
    assert!(!c.session().has_landed());
    assert!(!c.session().has_bumped());
    assert_eq!(w.position, ACTOR_SPAWN);
    assert_eq!(s.text, Message::StartPrompt.text());
    assert_eq!(c.session().episode_id(), episode + 1);
    assert!(!c.restart_pending());

    // Playable again.
    c.frame(&mut w, &START, &mut s, TICK_MS);
    assert_eq!(c.session().mode(), Mode::Running);
}
