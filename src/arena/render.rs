//! Sprites, backgrounds and audio
//!
//! Scene logic never touches these; every frame the render systems copy the
//! state of `Attacker`, `Boss` and `Viewport` onto Bevy sprites, converting
//! screen space to world space on the way.

use bevy::audio::Volume;
use bevy::prelude::*;
use bevy::window::WindowResized;
use std::collections::HashMap;

use crate::anim::{AnimationSet, Archetype, ClipKind, FRAME_SIZE};
use crate::combat::attacker::{ActorSlot, Attacker, Footing};
use crate::combat::boss::Boss;
use crate::combat::events::SoundCue;
use crate::settings::GameSettings;

use super::config::{ArenaConfig, ArenaTuning, Viewport};

const Z_FAR: f32 = 0.0;
const Z_NEAR: f32 = 1.0;
const Z_PLATFORM: f32 = 2.0;
const Z_BOSS: f32 = 3.0;
const Z_ACTOR: f32 = 4.0;

/// Texture and atlas layout of one clip's sprite sheet.
#[derive(Clone)]
struct Sheet {
    image: Handle<Image>,
    layout: Handle<TextureAtlasLayout>,
}

#[derive(Resource, Default)]
pub struct ActorSheets {
    sheets: HashMap<(Archetype, ClipKind), Sheet>,
}

#[derive(Component)]
pub struct BossSprite;

/// Raised ledge under a platform actor, anchored in screen space.
#[derive(Component)]
pub struct PlatformSprite(pub Vec2);

/// One tile of a scrolling background layer.
#[derive(Component)]
pub struct ParallaxTile {
    /// Position within the layer strip (0 or 1)
    pub index: u8,
    pub near: bool,
}

/// Horizontal scroll of each layer, in px.
#[derive(Resource, Default)]
pub struct ParallaxScroll {
    pub far: f32,
    pub near: f32,
}

/// Cut every known sheet into a one-row atlas.
pub fn load_actor_sheets(
    asset_server: Res<AssetServer>,
    set: Res<AnimationSet>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut sheets: ResMut<ActorSheets>,
) {
    for archetype in Archetype::all() {
        for clip in ClipKind::all() {
            let Some(spec) = set.get(archetype, clip) else {
                warn!("No {} sheet for {}", clip.key(), archetype.key());
                continue;
            };
            let path = format!("avatars/{}/{}", archetype.asset_dir(), clip.sheet_file());
            let layout = TextureAtlasLayout::from_grid(
                UVec2::splat(FRAME_SIZE),
                spec.frames as u32,
                1,
                None,
                None,
            );
            sheets.sheets.insert(
                (archetype, clip),
                Sheet {
                    image: asset_server.load(path),
                    layout: layouts.add(layout),
                },
            );
        }
    }
    debug!("Prepared {} actor sheets", sheets.sheets.len());
}

/// Re-measure each actor sheet once its texture arrives.
///
/// Frame counts come from the image width; the built-in counts only cover
/// the time before loading finishes.
pub fn measure_loaded_sheets(
    mut loaded: EventReader<AssetEvent<Image>>,
    images: Res<Assets<Image>>,
    sheets: Res<ActorSheets>,
    mut set: ResMut<AnimationSet>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut actors: Query<&mut Attacker>,
) {
    let mut changed = false;
    for event in loaded.read() {
        let AssetEvent::LoadedWithDependencies { id } = event else {
            continue;
        };
        let Some((&(archetype, clip), sheet)) =
            sheets.sheets.iter().find(|(_, sheet)| sheet.image.id() == *id)
        else {
            continue;
        };
        let Some(image) = images.get(*id) else {
            continue;
        };
        if image.width() < FRAME_SIZE {
            warn!(
                "{} sheet for {} is narrower than one frame",
                clip.key(),
                archetype.key()
            );
            continue;
        }
        if !set.apply_sheet_width(archetype, clip, image.width()) {
            continue;
        }

        let frames = image.width() / FRAME_SIZE;
        debug!("{} {} sheet has {} frames", archetype.key(), clip.key(), frames);
        layouts.insert(
            sheet.layout.id(),
            TextureAtlasLayout::from_grid(UVec2::splat(FRAME_SIZE), frames, 1, None, None),
        );
        changed = true;
    }

    if changed {
        for mut attacker in actors.iter_mut() {
            attacker.refresh_clip(&set);
        }
    }
}

pub fn spawn_backdrop(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<ArenaConfig>,
    tuning: Res<ArenaTuning>,
    viewport: Res<Viewport>,
) {
    let far = asset_server.load("background_far.png");
    let near = asset_server.load("background.png");
    for index in 0..2u8 {
        commands.spawn((
            Sprite {
                image: far.clone(),
                custom_size: Some(viewport.size()),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, Z_FAR),
            ParallaxTile { index, near: false },
        ));
        commands.spawn((
            Sprite {
                image: near.clone(),
                custom_size: Some(viewport.size() * 2.0),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, Z_NEAR),
            ParallaxTile { index, near: true },
        ));
    }

    commands.spawn((
        Sprite::from_image(asset_server.load("thanos.png")),
        Transform::from_xyz(0.0, 0.0, Z_BOSS),
        BossSprite,
    ));

    // Ledges sit under the actors' feet
    let foot = FRAME_SIZE as f32 * tuning.attacker.scale * 0.4;
    let ledges: Vec<Vec2> = ActorSlot::roster(config.variant.max_roster())
        .filter_map(|slot| match tuning.home_for(config.variant, slot) {
            (home, Footing::Platform(level)) => {
                Some(Vec2::new(home.x, tuning.platform_top(level) + foot))
            }
            _ => None,
        })
        .collect();
    for ledge in ledges {
        commands.spawn((
            Sprite {
                color: Color::srgb(0.22, 0.25, 0.32),
                custom_size: Some(Vec2::new(
                    tuning.squad.platform_width,
                    tuning.squad.platform_thickness,
                )),
                ..default()
            },
            Transform::from_translation(viewport.to_world(ledge).extend(Z_PLATFORM)),
            PlatformSprite(ledge),
        ));
    }
}

/// Follow the window size.
pub fn track_window_size(mut resized: EventReader<WindowResized>, mut viewport: ResMut<Viewport>) {
    if let Some(event) = resized.read().last() {
        let size = Viewport::new(event.width, event.height);
        if *viewport != size {
            *viewport = size;
        }
    }
}

pub fn scroll_parallax(
    time: Res<Time>,
    tuning: Res<ArenaTuning>,
    viewport: Res<Viewport>,
    mut scroll: ResMut<ParallaxScroll>,
    mut tiles: Query<(&ParallaxTile, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();
    scroll.far += dt * tuning.parallax.far_speed;
    scroll.near += dt * tuning.parallax.near_speed;

    for (tile, mut transform, mut sprite) in tiles.iter_mut() {
        let (size, offset, y) = if tile.near {
            (viewport.size() * 2.0, scroll.near, -tuning.parallax.near_offset_y)
        } else {
            (viewport.size(), scroll.far, 0.0)
        };
        transform.translation.x = tile.index as f32 * size.x - offset % size.x;
        transform.translation.y = y;
        sprite.custom_size = Some(size);
    }
}

pub fn sync_platforms(
    viewport: Res<Viewport>,
    mut platforms: Query<(&PlatformSprite, &mut Transform)>,
) {
    if !viewport.is_changed() {
        return;
    }
    for (platform, mut transform) in platforms.iter_mut() {
        transform.translation = viewport.to_world(platform.0).extend(Z_PLATFORM);
    }
}

pub fn sync_boss_sprite(
    boss: Res<Boss>,
    viewport: Res<Viewport>,
    mut sprites: Query<(&mut Transform, &mut Sprite, &mut Visibility), With<BossSprite>>,
) {
    let Ok((mut transform, mut sprite, mut visibility)) = sprites.get_single_mut() else {
        return;
    };

    let world = viewport.to_world(boss.position());
    transform.translation = world.extend(Z_BOSS);
    transform.scale = Vec3::splat(boss.scale());
    sprite.color = if boss.is_tinted() {
        Color::srgba(1.0, 0.0, 0.0, boss.alpha())
    } else {
        Color::srgba(1.0, 1.0, 1.0, boss.alpha())
    };
    *visibility = if boss.is_visible() && !boss.is_removed() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
}

/// Give newly spawned actors a sprite.
pub fn attach_actor_sprites(
    mut commands: Commands,
    sheets: Res<ActorSheets>,
    added: Query<(Entity, &Attacker), Added<Attacker>>,
) {
    for (entity, attacker) in added.iter() {
        let key = (attacker.archetype(), attacker.clip().clip());
        let sprite = match sheets.sheets.get(&key) {
            Some(sheet) => Sprite::from_atlas_image(
                sheet.image.clone(),
                TextureAtlas {
                    layout: sheet.layout.clone(),
                    index: 0,
                },
            ),
            None => Sprite::default(),
        };
        commands
            .entity(entity)
            .insert((sprite, Transform::from_xyz(0.0, 0.0, Z_ACTOR)));
    }
}

pub fn sync_actor_sprites(
    sheets: Res<ActorSheets>,
    tuning: Res<ArenaTuning>,
    viewport: Res<Viewport>,
    mut actors: Query<(&Attacker, &mut Sprite, &mut Transform)>,
) {
    for (attacker, mut sprite, mut transform) in actors.iter_mut() {
        let world = viewport.to_world(attacker.position);
        // Higher slots draw on top
        let z = Z_ACTOR + attacker.slot.index() as f32 * 0.01;
        transform.translation = world.extend(z);
        transform.scale = Vec3::splat(tuning.attacker.scale);
        sprite.flip_x = attacker.facing.flip_x();

        let key = (attacker.archetype(), attacker.clip().clip());
        let Some(sheet) = sheets.sheets.get(&key) else {
            continue;
        };
        if sprite.image != sheet.image {
            sprite.image = sheet.image.clone();
        }
        let frame = attacker.clip().frame();
        match sprite.texture_atlas.as_mut() {
            Some(atlas) => {
                if atlas.layout != sheet.layout {
                    atlas.layout = sheet.layout.clone();
                }
                atlas.index = frame;
            }
            None => {
                sprite.texture_atlas = Some(TextureAtlas {
                    layout: sheet.layout.clone(),
                    index: frame,
                });
            }
        }
    }
}

/// Play queued sound effects at the user's volume.
pub fn play_sound_cues(
    mut commands: Commands,
    mut cues: EventReader<SoundCue>,
    asset_server: Res<AssetServer>,
    settings: Res<GameSettings>,
) {
    for cue in cues.read() {
        let volume = cue.sfx.volume() * settings.master_volume;
        if volume <= 0.0 {
            continue;
        }
        commands.spawn((
            AudioPlayer::new(asset_server.load(cue.sfx.asset_path())),
            PlaybackSettings::DESPAWN
                .with_volume(Volume::new(volume))
                .with_speed(cue.sfx.rate()),
        ));
    }
}
