// rust/engine/tests/render_contracts.rs
#![forbid(unsafe_code)]

/**
 * Rendering boundary contracts.
 *
 * The core never draws; it hands out owned `Frame` snapshots that can be
 * rasterized to text or RGB bytes. These tests pin mode parsing, colours,
 * ASCII layout and snapshot independence.
 */
use platformer_engine::engine::{
    Action, Config, DiscreteConfig, DiscretePlatformerEnv, GREY, ORANGE, PURPLE, PlatformerEnv,
    PlatformerError, RenderMode, Rendered, WHITE,
};

fn pixel(data: &[u8], width: usize, x: usize, y: usize) -> [u8; 3] {
    let i = (y * width + x) * 3;
    [data[i], data[i + 1], data[i + 2]]
}

#[test]
fn render_mode_parsing() {
    assert_eq!("human".parse::<RenderMode>(), Ok(RenderMode::Human));
    assert_eq!("rgb_array".parse::<RenderMode>(), Ok(RenderMode::RgbArray));
    assert_eq!(
        "window".parse::<RenderMode>(),
        Err(PlatformerError::InvalidRenderMode("window".to_string()))
    );

    let env = PlatformerEnv::new(Config::default()).expect("env");
    assert!(matches!(
        env.render("bogus"),
        Err(PlatformerError::InvalidRenderMode(_))
    ));
}

#[test]
fn rgb_array_colours_blocks_player_and_background() {
    let env = PlatformerEnv::new(Config::default()).expect("env");
    let Rendered::Pixels {
        width,
        height,
        data,
    } = env.render("rgb_array").expect("rgb render")
    else {
        panic!("rgb_array must return pixels");
    };

    assert_eq!((width, height), (720, 512));
    assert_eq!(data.len(), 720 * 512 * 3);

    assert_eq!(pixel(&data, width, 10, 10), GREY);
    // Player at (0, 464), 16 x 32.
    assert_eq!(pixel(&data, width, 5, 470), ORANGE);
    // Init floor at y = 496: walls, then the end marker at x = 224.
    assert_eq!(pixel(&data, width, 5, 500), WHITE);
    assert_eq!(pixel(&data, width, 230, 500), PURPLE);
}

#[test]
fn human_mode_is_an_ascii_grid_with_a_status_line() {
    let env = PlatformerEnv::new(Config::default()).expect("env");
    let Rendered::Text(text) = env.render("human").expect("text render") else {
        panic!("human must return text");
    };

    let lines: Vec<&str> = text.lines().collect();
    // border + 32 rows + border + status
    assert_eq!(lines.len(), 35);
    assert_eq!(lines[0], format!("+{}+", "-".repeat(45)));
    assert!(lines.iter().skip(1).take(32).all(|l| l.chars().count() == 47));

    let row = |r: usize| lines[r + 1].chars().collect::<Vec<char>>();
    assert_eq!(row(29)[1], '@');
    assert_eq!(row(30)[1], '@');
    assert_eq!(row(31)[1], 'W');
    assert_eq!(row(31)[15], 'E');
    assert_eq!(row(31)[16], ' ');
    assert!(lines[34].starts_with("steps=0"));
}

#[test]
fn frames_are_owned_snapshots() {
    let mut env = PlatformerEnv::new(Config::default()).expect("env");
    let mut frame = env.frame();
    frame.rects.clear();
    frame.player.rect.x = 999;
    assert_eq!(env.frame().rects.len(), 15);
    assert_eq!(env.player().rect.x, 0);

    let before = env.frame();
    env.step(Action::Right.id()).expect("valid action");
    assert_eq!(before.player.rect.x, 0);
    assert_ne!(env.frame(), before);
}

#[test]
fn discrete_env_renders_both_modes() {
    let mut e = DiscretePlatformerEnv::new(DiscreteConfig::default());
    e.reset(Some(40), None);

    let Rendered::Text(text) = e.render("human").expect("text render") else {
        panic!("human must return text");
    };
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 20 + 3);
    // Player 10 x 20 at (40, 170): rows 17-18, column 4.
    assert_eq!(lines[18].chars().nth(5), Some('@'));
    assert_eq!(lines[20].chars().nth(11), Some('E'));

    let Rendered::Pixels { width, height, .. } = e.render("rgb_array").expect("rgb") else {
        panic!("rgb_array must return pixels");
    };
    assert_eq!((width, height), (210, 200));
}
