use std::cell::Cell;
use std::rc::Rc;

use signal_core::error::SceneError;
use signal_core::palette::Palette;
use signal_core::scene::skills::{
    entrance_scale, label_opacity, unit_box, Skill, SkillsLayout, MIN_BAR_SCALE, X_AXIS_LABEL,
};
use signal_core::scene::surface::{build_plane, displacement, edge_fade, SurfaceUniforms};
use signal_core::scene::{
    EntranceConfig, GpuResource, HeroSurfaceState, OrbitCamera, OrbitConfig, Release,
    SkillsScene, SKILLS,
};

#[test]
fn orbit_eases_toward_pointer_without_snapping() {
    let mut orbit = OrbitCamera::new(OrbitConfig::default());
    orbit.update_pointer(1.0, 0.5);
    assert!((orbit.target().x - 0.26).abs() < 1e-6);
    assert_eq!(orbit.current().x, 0.0);

    orbit.step();
    assert!((orbit.current().x - 0.26 * 0.04).abs() < 1e-6);
    let mut last_gap = orbit.target().x - orbit.current().x;
    for _ in 0..100 {
        orbit.step();
        let gap = orbit.target().x - orbit.current().x;
        assert!(gap > 0.0 && gap < last_gap);
        last_gap = gap;
    }
}

#[test]
fn orbit_clamps_pointer_and_keeps_distance() {
    let mut orbit = OrbitCamera::new(OrbitConfig::default());
    assert!((orbit.eye().length() - 9.2).abs() < 1e-4);

    orbit.update_pointer(5.0, -3.0);
    assert!((orbit.target().x - 0.26).abs() < 1e-6);
    assert!((orbit.target().y + 0.14).abs() < 1e-6);
    for _ in 0..50 {
        orbit.step();
    }
    assert!((orbit.eye().length() - 9.2).abs() < 1e-4);
    assert_eq!(orbit.camera().eye, orbit.eye());
}

#[test]
fn plane_mesh_counts() {
    let mesh = build_plane(16.0, 10.0, 4, 2).unwrap();
    assert_eq!(mesh.vertices.len(), 15);
    assert_eq!(mesh.triangles.len(), 48);
    assert_eq!(mesh.lines.len(), 60);
    assert_eq!(mesh.vertices[0].uv, [0.0, 1.0]);
    assert_eq!(mesh.vertices[0].position, [-8.0, 0.0, -5.0]);
    assert_eq!(mesh.vertices[14].uv, [1.0, 0.0]);
    assert!(mesh.triangles.iter().all(|&i| (i as usize) < mesh.vertices.len()));

    assert_eq!(
        build_plane(16.0, 10.0, 0, 3).unwrap_err(),
        SceneError::EmptyGrid { x: 0, z: 3 }
    );
}

#[test]
fn surface_is_flat_at_the_border() {
    assert_eq!(edge_fade([0.0, 0.5]), 0.0);
    assert_eq!(edge_fade([0.5, 1.0]), 0.0);
    assert_eq!(edge_fade([0.5, 0.5]), 1.0);
    assert_eq!(displacement(-8.0, 0.0, [0.0, 0.5], 3.0, 0.55), 0.0);
    assert!(displacement(0.3, 0.2, [0.52, 0.48], 1.0, 0.55).abs() <= 0.65 * 1.55);
}

#[test]
fn surface_uniforms_follow_time_and_palette() {
    assert_eq!(std::mem::size_of::<SurfaceUniforms>(), 112);

    let mut state = HeroSurfaceState::default();
    state.resize(1600.0, 800.0);
    state.update_palette(&Palette::from_tokens("#ff0000", "#0000ff", true));
    let u = state.update(2500.0);
    assert!((u.time - 2.5).abs() < 1e-6);
    assert_eq!(u.carrier, [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(u.modulation, [0.0, 0.0, 1.0, 1.0]);
    assert_eq!(u.mu, 0.55);
    assert_eq!(u.beta, 5.0);
}

#[test]
fn skills_layout_spreads_peaks_across_width() {
    let layout = SkillsLayout::for_count(6).unwrap();
    assert!((layout.gap - 2.12).abs() < 1e-5);
    assert!((layout.peak_x(0) + 7.55).abs() < 1e-5);
    assert!((layout.peak_x(5) - 7.55).abs() < 1e-5);
    assert_eq!(layout.noise_xs(0).len(), 4);

    assert_eq!(
        SkillsLayout::for_count(1).unwrap_err(),
        SceneError::TooFewItems { min: 2, got: 1 }
    );
}

#[test]
fn entrance_staggers_and_labels_fade_in() {
    let cfg = EntranceConfig::default();
    assert_eq!(entrance_scale(0, 600.0, &cfg), 1.0);
    assert_eq!(entrance_scale(3, 300.0, &cfg), 0.0);
    assert!((entrance_scale(0, 300.0, &cfg) - 0.875).abs() < 1e-6);

    assert_eq!(label_opacity(0.3), 0.0);
    assert!((label_opacity(0.5) - 0.5).abs() < 1e-6);
    assert_eq!(label_opacity(1.0), 1.0);
}

#[test]
fn zero_duration_entrance_reveals_at_each_delay() {
    let cfg = EntranceConfig {
        duration_ms: 0.0,
        ..EntranceConfig::default()
    };
    assert_eq!(entrance_scale(0, 0.0, &cfg), 1.0);
    assert_eq!(entrance_scale(2, 100.0, &cfg), 0.0);
    assert_eq!(entrance_scale(2, 240.0, &cfg), 1.0);

    let negative = EntranceConfig {
        duration_ms: -50.0,
        ..EntranceConfig::default()
    };
    for t in [0.0, 60.0, 1_000.0] {
        assert!(entrance_scale(1, t, &negative).is_finite());
    }
}

#[test]
fn bars_stay_hidden_until_entrance() {
    let mut scene = SkillsScene::new(&SKILLS, EntranceConfig::default(), 1).unwrap();
    scene.resize(800.0, 400.0);
    let frame = scene.update(5000.0);
    assert_eq!(frame.peaks.len(), SKILLS.len());
    assert!(frame.peaks.iter().all(|b| b.offset[3] == MIN_BAR_SCALE));
    assert!(frame.labels.iter().all(|l| l.opacity == 0.0));
    assert!(!frame.noise.is_empty());
}

#[test]
fn entrance_triggers_once_and_reveals_in_order() {
    let mut scene = SkillsScene::new(&SKILLS, EntranceConfig::default(), 1).unwrap();
    scene.resize(800.0, 400.0);
    assert!(scene.trigger_entrance(1000.0));
    assert!(!scene.trigger_entrance(1200.0));
    assert!(scene.entrance_triggered());

    let frame = scene.update(1300.0);
    let scales: Vec<f32> = frame.peaks.iter().map(|b| b.offset[3]).collect();
    assert!(scales.windows(2).all(|w| w[0] >= w[1]));
    assert!((scales[0] - 0.875).abs() < 1e-6);
    assert_eq!(scales[3], MIN_BAR_SCALE);
    assert_eq!(frame.labels[3].opacity, 0.0);
}

#[test]
fn revealed_bars_oscillate_gently() {
    let mut scene = SkillsScene::new(&SKILLS, EntranceConfig::default(), 1).unwrap();
    scene.trigger_entrance(0.0);
    for t in [5_000.0, 7_300.0, 11_100.0] {
        let frame = scene.update(t);
        for bar in &frame.peaks {
            assert!((0.979..=1.021).contains(&bar.offset[3]));
        }
        assert!(scene.peaks().iter().all(|p| p.current_scale == 1.0));
    }
}

#[test]
fn skills_frame_labels_and_axes() {
    let mut scene = SkillsScene::new(&SKILLS, EntranceConfig::default(), 1).unwrap();
    scene.resize(800.0, 400.0);
    let frame = scene.update(0.0);
    assert_eq!(frame.labels[0].name, "Programming");
    assert_eq!(frame.labels[0].db_text, "9.2 dB");
    let ticks: Vec<&str> = frame.ticks.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(ticks, vec!["0 dB", "3 dB", "5 dB", "7 dB", "9 dB"]);
    assert_eq!(frame.x_axis.unwrap().text, X_AXIS_LABEL);
    assert_eq!(scene.static_lines().len(), 66);
}

#[test]
fn out_of_range_proficiency_is_rejected() {
    let skills = [
        Skill {
            name: "a",
            detail: "",
            proficiency: 0.5,
        },
        Skill {
            name: "b",
            detail: "",
            proficiency: 1.5,
        },
    ];
    assert_eq!(
        SkillsScene::new(&skills, EntranceConfig::default(), 0).err(),
        Some(SceneError::Proficiency(1.5))
    );
}

#[test]
fn unit_box_geometry() {
    let (vertices, triangles, edges) = unit_box();
    assert_eq!(vertices.len(), 24);
    assert_eq!(triangles.len(), 36);
    assert_eq!(edges.len(), 48);
    assert!(vertices.iter().all(|v| (0.0..=1.0).contains(&v.position[1])));
}

struct Counted(Rc<Cell<u32>>);

impl Release for Counted {
    fn release(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn gpu_resource_releases_exactly_once() {
    let releases = Rc::new(Cell::new(0));
    let mut res = GpuResource::new(Counted(releases.clone()));
    assert!(res.get().is_some());
    assert!(res.dispose());
    assert!(!res.dispose());
    assert!(res.is_disposed());
    drop(res);
    assert_eq!(releases.get(), 1);

    let dropped = GpuResource::new(Counted(releases.clone()));
    drop(dropped);
    assert_eq!(releases.get(), 2);
}
