//! Thanos Arena - boss-fight vignette
//!
//! Graphical by default; `--headless CONFIG` runs a scripted scene instead.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use thanos_arena::arena::{ArenaConfig, ArenaPlugin, ArenaRenderPlugin, Viewport};
use thanos_arena::camera::CameraPlugin;
use thanos_arena::cli;
use thanos_arena::headless::{run_headless_scene, HeadlessSceneConfig};
use thanos_arena::settings::{GameSettings, SettingsPlugin};
use thanos_arena::ui::UiPlugin;

fn main() {
    let args = cli::parse_args();

    if let Some(config_path) = args.headless {
        let result = HeadlessSceneConfig::load_from_file(&config_path).and_then(|mut config| {
            if let Some(output) = args.output {
                config.output_path = Some(output.to_string_lossy().into_owned());
            }
            if let Some(max_duration) = args.max_duration {
                config.max_duration_secs = max_duration;
            }
            if args.seed.is_some() {
                config.random_seed = args.seed;
            }
            run_headless_scene(config)
        });
        if let Err(e) = result {
            eprintln!("Headless scene failed: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let config = ArenaConfig::new(args.variant).with_seed(args.seed);
    if let Err(e) = config.validate() {
        eprintln!("Invalid arena configuration: {}", e);
        std::process::exit(1);
    }

    // Read once here for the window; SettingsPlugin owns the resource
    let settings = GameSettings::load();
    let (width, height) = settings.window_resolution();

    App::new()
        // Bevy default plugins with custom window settings
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: format!("Thanos Arena - {}", config.variant),
                resolution: (width, height).into(),
                mode: settings.window_mode.to_bevy(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        // Our game plugins
        .add_plugins((
            EguiPlugin,
            SettingsPlugin,
            ArenaPlugin::new(config).with_viewport(Viewport::new(width, height)),
            ArenaRenderPlugin,
            CameraPlugin,
            UiPlugin,
        ))
        .run();
}
