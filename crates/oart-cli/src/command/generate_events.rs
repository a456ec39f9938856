use std::path::PathBuf;

use anyhow::ensure;
use oart_core::{
    Location, PITCH_LENGTH, PITCH_WIDTH, PassContext, PassEvent, PlayPattern, PlayerObservation,
};
use rand::{Rng, SeedableRng as _, seq::IndexedRandom};
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg32;

use crate::util::Output;

/// Spread of teammates and opponents around the passer.
const POSITION_SIGMA: f64 = 12.0;
/// Mean forward offset of teammates from the passer.
const TEAMMATE_FORWARD_SHIFT: f64 = 6.0;
/// Spread of the receiver pick around a player's tendency.
const CHOICE_SIGMA: f64 = 0.75;
/// An opponent this close marks the passer as under pressure.
const PRESSURE_DISTANCE: f64 = 5.0;

const PLAY_PATTERNS: [PlayPattern; 10] = [
    PlayPattern::RegularPlay,
    PlayPattern::RegularPlay,
    PlayPattern::RegularPlay,
    PlayPattern::RegularPlay,
    PlayPattern::RegularPlay,
    PlayPattern::FromThrowIn,
    PlayPattern::FromCounter,
    PlayPattern::FromFreeKick,
    PlayPattern::FromGoalKick,
    PlayPattern::FromCorner,
];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateEventsArg {
    /// Number of players
    #[arg(long, default_value_t = 12)]
    players: usize,
    /// Number of passes per player
    #[arg(long, default_value_t = 60)]
    events_per_player: usize,
    /// Random seed
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Fraction of passes without a freeze-frame
    #[arg(long, default_value_t = 0.05)]
    missing_frame_rate: f64,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Synthetic pass generator.
///
/// Each player has a risk tendency in (0, 1): the receiver is picked among the teammates
/// ordered by distance, nearer for low tendencies and farther for high ones.
#[derive(Debug)]
struct PassGenerator {
    rng: Pcg32,
    position: Normal<f64>,
    choice: Normal<f64>,
    missing_frame_rate: f64,
}

impl PassGenerator {
    fn new(seed: u64, missing_frame_rate: f64) -> anyhow::Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&missing_frame_rate),
            "missing frame rate must be within [0, 1], got {missing_frame_rate}"
        );
        Ok(Self {
            rng: Pcg32::seed_from_u64(seed),
            position: Normal::new(0.0, POSITION_SIGMA)?,
            choice: Normal::new(0.0, CHOICE_SIGMA)?,
            missing_frame_rate,
        })
    }

    fn around(&mut self, center: Location, forward_shift: f64) -> Location {
        let x = center.x + forward_shift + self.position.sample(&mut self.rng);
        let y = center.y + self.position.sample(&mut self.rng);
        Location::new(x.clamp(0.0, PITCH_LENGTH), y.clamp(0.0, PITCH_WIDTH))
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn pick_receiver(
        &mut self,
        teammates: &[Location],
        passer: Location,
        tendency: f64,
    ) -> Location {
        let mut by_distance = teammates.to_vec();
        by_distance.sort_by(|a, b| a.distance_to(passer).total_cmp(&b.distance_to(passer)));
        let last = by_distance.len() - 1;
        let pick = (tendency * last as f64 + self.choice.sample(&mut self.rng))
            .round()
            .clamp(0.0, last as f64) as usize;
        by_distance[pick]
    }

    fn generate(&mut self, player: &str, id: String, tendency: f64) -> PassEvent {
        let passer = Location::new(
            self.rng.random_range(15.0..105.0),
            self.rng.random_range(8.0..72.0),
        );
        let teammates = (0..self.rng.random_range(2..=6))
            .map(|_| self.around(passer, TEAMMATE_FORWARD_SHIFT))
            .collect::<Vec<_>>();
        let opponents = (0..self.rng.random_range(3..=7))
            .map(|_| self.around(passer, 0.0))
            .collect::<Vec<_>>();
        let receiver = self.pick_receiver(&teammates, passer, tendency);

        let minute = self.rng.random_range(1..=95);
        let pressed = opponents
            .iter()
            .any(|o| o.distance_to(passer) <= PRESSURE_DISTANCE);
        let context = PassContext {
            minute,
            period: if minute > 45 { 2 } else { 1 },
            under_pressure: pressed || self.rng.random_bool(0.1),
            play_pattern: PLAY_PATTERNS
                .choose(&mut self.rng)
                .copied()
                .unwrap_or_default(),
        };

        let mut pass = PassEvent::new(player, passer, receiver)
            .with_id(id)
            .with_context(context);
        pass.team = Some("synthetic".to_owned());
        if !self.rng.random_bool(self.missing_frame_rate) {
            let keeper = Location::new(
                self.rng.random_range(114.0..119.0),
                self.rng.random_range(36.0..44.0),
            );
            let frame = [PlayerObservation::actor(passer)]
                .into_iter()
                .chain(teammates.into_iter().map(PlayerObservation::teammate))
                .chain(opponents.into_iter().map(PlayerObservation::opponent))
                .chain([PlayerObservation::opponent(keeper).with_keeper()])
                .collect();
            pass = pass.with_freeze_frame(frame);
        }
        pass
    }
}

#[expect(clippy::cast_precision_loss)]
fn generate_events(arg: &GenerateEventsArg) -> anyhow::Result<Vec<PassEvent>> {
    let mut generator = PassGenerator::new(arg.seed, arg.missing_frame_rate)?;
    let mut passes = Vec::with_capacity(arg.players * arg.events_per_player);
    for i in 0..arg.players {
        let player = format!("player-{i:02}");
        let tendency = (i as f64 + 0.5) / arg.players as f64;
        tracing::debug!(player = %player, tendency, "generating passes");
        for j in 0..arg.events_per_player {
            passes.push(generator.generate(&player, format!("{player}-{j:04}"), tendency));
        }
    }
    Ok(passes)
}

pub(crate) fn run(arg: &GenerateEventsArg) -> anyhow::Result<()> {
    let passes = generate_events(arg)?;
    let with_frame = passes
        .iter()
        .filter(|p| p.populated_freeze_frame().is_some())
        .count();
    Output::save_json(&passes, arg.output.clone())?;

    eprintln!("Generated {} passes", passes.len());
    eprintln!("  Players: {}", arg.players);
    eprintln!("  With freeze-frame: {with_frame}");
    eprintln!("  Seed: {}", arg.seed);
    Ok(())
}
