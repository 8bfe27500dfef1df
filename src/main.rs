use std::path::PathBuf;

use anyhow::Context;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use clap::Parser;

use chemlab::assets::LabAssetsPlugin;
use chemlab::core::{CorePlugin, LabConfig, SceneProfile};
use chemlab::input::InputPlugin;
use chemlab::lab::LabPlugin;
use chemlab::rendering::RenderingPlugin;
use chemlab::ui::UiPlugin;

/// Interactive 3D chemistry lab: pour a test tube into a flask
#[derive(Parser, Debug)]
#[command(name = "chemlab", version)]
struct Cli {
    /// JSON config file (defaults to lab.json in the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scene setup
    #[arg(long, value_enum)]
    profile: Option<SceneProfile>,

    /// Log filter, e.g. "info,chemlab=debug"
    #[arg(long)]
    log_filter: Option<String>,

    /// glTF asset path, relative to the assets directory
    #[arg(long)]
    asset: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut LabConfig) {
        if let Some(profile) = self.profile {
            config.profile = profile;
        }
        if let Some(filter) = self.log_filter {
            config.log_filter = filter;
        }
        if let Some(asset) = self.asset {
            config.asset.path = asset;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone();

    let mut config = LabConfig::resolve(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("failed to load config from {}", path.display()),
        None => "failed to load config".to_string(),
    })?;
    cli.apply(&mut config);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(config.window.to_window()),
                    ..default()
                })
                .set(LogPlugin {
                    filter: config.log_filter.clone(),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin::default())
        .add_plugins(MeshPickingPlugin)
        .add_plugins(CorePlugin::new(config))
        .add_plugins(LabPlugin)
        .add_plugins(LabAssetsPlugin)
        .add_plugins(RenderingPlugin)
        .add_plugins(InputPlugin)
        .add_plugins(UiPlugin)
        .run();

    Ok(())
}
