//! Game layer: one simulation wired to a scene host and an audio sink
//!
//! The host frame scheduler calls [`Game::frame`] once per frame and forwards
//! accelerometer samples to [`Game::accelerate`] whenever they arrive.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioManager, AudioSink, SoundEffect};
use crate::scene::{
    self, AVATAR_FRAME, AVATAR_Z_ORDER, DrawableId, PLATFORM_Z_ORDER, SceneError, SceneHost,
};
use crate::settings::{AudioSettings, SimConfig};
use crate::sim::{GameEvent, GameState, PlatformVariant, tick};

pub struct Game<S: SceneHost, A: AudioSink> {
    state: GameState,
    scene: S,
    audio: AudioManager<A>,
}

impl<S: SceneHost, A: AudioSink> Game<S, A> {
    /// Populate the scene, start a session and the background music
    pub fn new(
        config: SimConfig,
        audio_settings: AudioSettings,
        mut scene: S,
        sink: A,
        seed: u64,
    ) -> Result<Self, SceneError> {
        let mut rng = Pcg32::seed_from_u64(seed);

        scene.create_drawable(DrawableId::Avatar, AVATAR_FRAME, AVATAR_Z_ORDER);
        for slot in 0..config.platform_pool_size {
            let variant = PlatformVariant::random(&mut rng);
            scene.create_drawable(
                DrawableId::Platform(slot),
                variant.atlas_rect(),
                PLATFORM_Z_ORDER,
            );
        }

        let sizes = scene::sprite_sizes(&scene, config.platform_pool_size)?;
        scene::check_fits_screen(&sizes, config.screen_width)?;
        let mut state = GameState::new(config, sizes, rng);
        state.start_session();
        scene::sync(&mut scene, &state)?;

        let mut audio = AudioManager::new(sink, audio_settings);
        audio.start_music();

        log::info!("Game initialized with seed: {}", seed);
        Ok(Self {
            state,
            scene,
            audio,
        })
    }

    /// Advance one frame and present the result
    pub fn frame(&mut self, dt: f32) -> Result<Vec<GameEvent>, SceneError> {
        let was_running = !self.state.suspended();
        let events = tick(&mut self.state, dt);

        for event in &events {
            match event {
                GameEvent::Jumped { .. } => self.audio.play(SoundEffect::Jump),
                GameEvent::FellOut => log::info!("Game over after {} frames", self.state.frames),
                GameEvent::Recycled { .. } => {}
            }
        }

        if was_running {
            scene::sync(&mut self.scene, &self.state)?;
        }
        Ok(events)
    }

    /// Accelerometer callback
    pub fn accelerate(&mut self, tilt_x: f32) {
        self.state.accelerate(tilt_x);
    }

    /// Start over with a fresh layout
    pub fn restart(&mut self) -> Result<(), SceneError> {
        self.state.start_session();
        scene::sync(&mut self.scene, &self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn audio(&self) -> &AudioManager<A> {
        &self.audio
    }
}

impl<S: SceneHost, A: AudioSink> Drop for Game<S, A> {
    fn drop(&mut self) {
        self.audio.stop_all();
    }
}
