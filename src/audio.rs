//! Sound cue boundary
//!
//! The simulation only says *when* something audible happens. Synthesis is the
//! embedder's job: it implements [`SoundService`] and the loop calls it at the
//! moments the simulation reports.

/// Sound cue types, one per audible moment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Player fired a projectile
    PlayerFire,
    /// A formation member fired
    EnemyFire,
    /// A formation member was destroyed
    Explosion,
    /// Formation animation step
    FormationPulse,
    /// Bonus target entered the field (looping until stopped)
    BonusSpawn,
}

/// Handle to a looping bonus target sound
pub trait BonusSoundHandle {
    fn stop(&mut self);
}

/// Fire-and-forget sound notifications
pub trait SoundService {
    type Handle: BonusSoundHandle;

    fn on_player_fire(&mut self);
    fn on_enemy_fire(&mut self);
    fn on_explosion(&mut self);
    fn on_formation_pulse(&mut self);
    fn on_bonus_spawn(&mut self) -> Self::Handle;
}

/// Handle that does nothing
#[derive(Debug, Default)]
pub struct SilentHandle;

impl BonusSoundHandle for SilentHandle {
    fn stop(&mut self) {}
}

/// Sound service that discards every cue
#[derive(Debug, Default)]
pub struct NullSound;

impl SoundService for NullSound {
    type Handle = SilentHandle;

    fn on_player_fire(&mut self) {}
    fn on_enemy_fire(&mut self) {}
    fn on_explosion(&mut self) {}
    fn on_formation_pulse(&mut self) {}
    fn on_bonus_spawn(&mut self) -> SilentHandle {
        SilentHandle
    }
}

/// Sound service that writes cues to the log (headless runs, debugging)
pub struct LogSound {
    volume: f32,
    muted: bool,
    /// Formation pulse walks down a four-note bass line
    pulse_note: usize,
}

impl Default for LogSound {
    fn default() -> Self {
        Self::new()
    }
}

/// Semitone offsets of the formation pulse bass line
const PULSE_SEMITONES: [i32; 4] = [0, -1, -2, -3];
const PULSE_BASE_FREQ: f32 = 55.0;

impl LogSound {
    pub fn new() -> Self {
        Self {
            volume: 0.15,
            muted: false,
            pulse_note: 0,
        }
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all cues
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    fn emit(&self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("sound {:?} at volume {:.2}", cue, vol);
    }

    /// Frequency of the next formation pulse note
    pub fn next_pulse_frequency(&mut self) -> f32 {
        let semitone = PULSE_SEMITONES[self.pulse_note];
        self.pulse_note = (self.pulse_note + 1) % PULSE_SEMITONES.len();
        PULSE_BASE_FREQ * 2f32.powf(semitone as f32 / 12.0)
    }
}

/// Handle for a logged bonus loop
#[derive(Debug, Default)]
pub struct LoggedHandle {
    stopped: bool,
}

impl LoggedHandle {
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl BonusSoundHandle for LoggedHandle {
    fn stop(&mut self) {
        if !self.stopped {
            log::debug!("sound BonusSpawn stopped");
            self.stopped = true;
        }
    }
}

impl SoundService for LogSound {
    type Handle = LoggedHandle;

    fn on_player_fire(&mut self) {
        self.emit(SoundCue::PlayerFire);
    }

    fn on_enemy_fire(&mut self) {
        self.emit(SoundCue::EnemyFire);
    }

    fn on_explosion(&mut self) {
        self.emit(SoundCue::Explosion);
    }

    fn on_formation_pulse(&mut self) {
        let freq = self.next_pulse_frequency();
        if self.effective_volume() > 0.0 {
            log::trace!("formation pulse {:.1} Hz", freq);
        }
        self.emit(SoundCue::FormationPulse);
    }

    fn on_bonus_spawn(&mut self) -> LoggedHandle {
        self.emit(SoundCue::BonusSpawn);
        LoggedHandle::default()
    }
}
