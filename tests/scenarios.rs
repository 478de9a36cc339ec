use std::sync::mpsc;

use image::{GrayImage, Luma};
use minifb::Key;
use rand::rngs::StdRng;
use rand::SeedableRng;

use reaction_diffusion::clock::PlaybackState;
use reaction_diffusion::draw::fill_disc;
use reaction_diffusion::input::{InputEvent, InputQueue};
use reaction_diffusion::overlay::draw_border;
use reaction_diffusion::params::{ParamOverrides, Resolution, SimulationParameters};
use reaction_diffusion::pipeline::{self, FilterSettings};
use reaction_diffusion::seed::SeedImage;
use reaction_diffusion::status::Status;
use reaction_diffusion::text::TextRasterizer;
use reaction_diffusion::types::Frame;
use reaction_diffusion::Simulation;

fn noise_seed() -> SeedImage {
    let mut state = 0x9e37_79b9u32;
    SeedImage::from_gray(GrayImage::from_fn(120, 120, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        Luma([(state >> 24) as u8])
    }))
}

fn sim_at(px: u32) -> Simulation {
    Simulation::new(
        noise_seed(),
        Resolution::or_default(px),
        ParamOverrides::default(),
        TextRasterizer::bitmap_only(),
        StdRng::seed_from_u64(42),
    )
}

fn press(sim: &mut Simulation, key: Key) {
    let mut q = InputQueue::default();
    q.push(InputEvent::Key(key));
    sim.process(&mut q);
}

#[test]
fn digit_zero_steps_ten_and_five_steps_five() {
    let mut sim = sim_at(100);
    press(&mut sim, Key::Space);
    assert_eq!(sim.playback(), PlaybackState::Paused);

    let before = sim.clock().pipeline_runs();
    press(&mut sim, Key::Key0);
    assert_eq!(sim.clock().pipeline_runs() - before, 10);

    let before = sim.clock().pipeline_runs();
    press(&mut sim, Key::Key5);
    assert_eq!(sim.clock().pipeline_runs() - before, 5);
}

#[test]
fn burst_is_ignored_while_running() {
    let mut sim = sim_at(100);
    let frame = sim.frame().clone();
    let runs = sim.clock().pipeline_runs();
    press(&mut sim, Key::Key7);
    assert_eq!(sim.clock().pipeline_runs(), runs);
    assert_eq!(sim.frame(), &frame);
}

#[test]
fn burst_matches_repeated_ticks() {
    let mut a = sim_at(100);
    let mut b = sim_at(100);
    a.toggle();
    b.toggle();
    assert_eq!(a.step_burst(3), 3);
    b.toggle();
    for _ in 0..3 {
        b.tick();
    }
    assert_eq!(a.frame(), b.frame());
}

#[test]
fn second_pause_changes_nothing() {
    let mut sim = sim_at(100);
    let (tx, rx) = mpsc::channel::<Status>();
    sim.add_observer(Box::new(tx));

    sim.pause();
    assert_eq!(rx.try_iter().count(), 1);
    let state = sim.playback();
    let ticks = sim.clock().ticks();
    let runs = sim.clock().pipeline_runs();

    sim.pause();
    assert_eq!(sim.playback(), state);
    assert_eq!(sim.clock().ticks(), ticks);
    assert_eq!(sim.clock().pipeline_runs(), runs);
    assert_eq!(rx.try_iter().count(), 0);
}

#[test]
fn resolution_change_restarts_from_seed() {
    let mut sim = sim_at(300);
    for _ in 0..5 {
        sim.tick();
    }
    sim.params_mut().text.content = "AB".to_string();
    press(&mut sim, Key::B);
    press(&mut sim, Key::X);
    press(&mut sim, Key::F);
    press(&mut sim, Key::Space);
    sim.reinitialize(Resolution::or_default(200));

    let fresh = sim_at(200);
    assert_eq!(sim.frame(), fresh.frame());
    assert_eq!(sim.playback(), PlaybackState::Running);
    assert_eq!(sim.params(), &SimulationParameters::for_resolution(Resolution::or_default(200)));
}

#[test]
fn text_submit_then_resume_runs_one_feedback_step() {
    let mut sim = sim_at(300);
    sim.params_mut().text.content = "AB".to_string();

    sim.submit_text();
    assert_eq!(sim.playback(), PlaybackState::Paused);

    // Outlined stamp: white glyph body with a black halo, centred.
    let mask = TextRasterizer::bitmap_only().coverage(&sim.params().text, 300, 300);
    let covered: Vec<usize> = (0..mask.len()).filter(|&i| mask[i]).collect();
    assert!(!covered.is_empty());
    assert!(covered.iter().all(|&i| sim.frame().pixels[i] == 255));
    assert_eq!(sim.frame().get(100, 93), 0);
    let (sx, sy) = covered
        .iter()
        .fold((0usize, 0usize), |(sx, sy), &i| (sx + i % 300, sy + i / 300));
    let (cx, cy) = (sx as f32 / covered.len() as f32, sy as f32 / covered.len() as f32);
    assert!((cx - 150.0).abs() < 10.0 && (cy - 150.0).abs() < 10.0, "centroid {cx},{cy}");

    let previous = sim.frame().clone();
    assert_eq!(sim.toggle(), PlaybackState::Running);
    sim.tick();

    let mut expected = pipeline::run(&previous, FilterSettings::from(sim.params()));
    draw_border(&mut expected);
    assert_eq!(sim.frame(), &expected);
    assert_ne!(sim.frame(), &previous);
}

#[test]
fn fifty_random_points_on_white() {
    let mut sim = sim_at(300);
    sim.clear();
    {
        let p = sim.params_mut();
        p.random_point_count = 50;
        p.random_point_size = 50.0;
    }

    let centres = sim.seed_random_points();
    assert_eq!(sim.playback(), PlaybackState::Paused);
    assert_eq!(centres.len(), 50);

    let mut expected = Frame::white(300, 300);
    for &(x, y) in &centres {
        assert!((0.0..300.0).contains(&x) && (0.0..300.0).contains(&y));
        assert_eq!(sim.frame().get(x as usize, y as usize), 0);
        fill_disc(&mut expected, x, y, 50.0, 0);
    }
    // Nothing but those 50 discs was drawn.
    assert_eq!(sim.frame(), &expected);
}

#[test]
fn border_survives_running_ticks() {
    let mut sim = sim_at(200);
    for _ in 0..4 {
        sim.tick();
    }
    let mut again = sim.frame().clone();
    draw_border(&mut again);
    assert_eq!(sim.frame(), &again);
    assert_eq!(sim.frame().get(0, 0), 255);
    assert_eq!(sim.frame().get(199, 100), 255);
}
