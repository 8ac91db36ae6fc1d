//! Argument groups shared by several commands
//!
//! Level 4 - Configuration

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};

use neurotac_core::{EngineConfig, MarkEncoding};
use neurotac_evolve::{layer_sizes, load_batch, CrossoverKind, Network};
use neurotac_tournament::ScoringConfig;

/// Mark values handed to strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EncodingArg {
    /// Empty 0, First 1, Second 2
    Ordinal,
    /// Empty 0, First 1, Second -1
    Signed,
}

/// Two-parent crossover operator
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CrossoverArg {
    /// Each weight from either parent
    Uniform,
    /// Weights before a random cut from one parent, the rest from the other
    SinglePoint,
}

impl From<CrossoverArg> for CrossoverKind {
    fn from(arg: CrossoverArg) -> Self {
        match arg {
            CrossoverArg::Uniform => CrossoverKind::Uniform,
            CrossoverArg::SinglePoint => CrossoverKind::SinglePoint,
        }
    }
}

impl From<EncodingArg> for MarkEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Ordinal => MarkEncoding::ORDINAL,
            EncodingArg::Signed => MarkEncoding::SIGNED,
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct EngineArgs {
    /// Minimax depth: how many plies to look ahead before the strategy scores the board
    #[arg(short = 'd', long, default_value = "1")]
    pub depth: u32,

    /// Let the strategy score all nine cells directly instead of searching
    #[arg(long)]
    pub policy: bool,

    /// Mark encoding fed to strategies
    #[arg(long, value_enum, default_value = "ordinal")]
    pub encoding: EncodingArg,

    /// Append the ply counter as an extra input
    #[arg(long)]
    pub include_round: bool,

    /// Engine config JSON; replaces the flags above
    #[arg(long, value_name = "FILE")]
    pub engine_config: Option<PathBuf>,
}

impl EngineArgs {
    pub fn to_config(&self) -> Result<EngineConfig> {
        let config = match &self.engine_config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("Failed to load engine config: {}", path.display()))?,
            None => {
                let base = if self.policy {
                    EngineConfig::policy()
                } else {
                    EngineConfig::minimax(self.depth)
                };
                base.with_encoding(self.encoding.into())
                    .with_round_input(self.include_round)
            }
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Clone, Debug)]
pub struct ScoringArgs {
    /// Score for a win
    #[arg(long, default_value = "1")]
    pub win: f32,

    /// Score for a loss
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub loss: f32,

    /// Score for a draw
    #[arg(long, default_value = "0.5")]
    pub draw: f32,

    /// Bonus for the second seat on wins and draws
    #[arg(long, default_value = "0.05")]
    pub second_seat_bonus: f32,

    /// Bonus per ply played
    #[arg(long, default_value = "0")]
    pub round_bonus: f32,

    /// Score for a player making an illegal move
    #[arg(long, default_value = "-9", allow_negative_numbers = true)]
    pub illegal_penalty: f32,

    /// Score for the opponent of an illegal move
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub illegal_credit: f32,
}

impl ScoringArgs {
    pub fn to_config(&self) -> Result<ScoringConfig> {
        let config = ScoringConfig {
            win: self.win,
            loss: self.loss,
            draw: self.draw,
            second_seat_bonus: self.second_seat_bonus,
            round_bonus: self.round_bonus,
            illegal_penalty: self.illegal_penalty,
            illegal_credit: self.illegal_credit,
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Clone, Debug)]
pub struct NetworkArgs {
    /// Hidden layers in each network
    #[arg(short = 'l', long, default_value = "2")]
    pub hidden_layers: usize,

    /// Neurons per hidden layer
    #[arg(short = 'n', long, default_value = "9")]
    pub neurons_per_layer: usize,
}

impl NetworkArgs {
    /// Layer sizes matching the engine's input and output widths
    pub fn layers(&self, engine: &EngineConfig) -> Vec<usize> {
        layer_sizes(
            engine.input_width(),
            self.neurons_per_layer,
            self.hidden_layers,
            engine.output_width(),
        )
    }
}

/// Load one network from a batch by name or index
pub fn load_network(path: &Path, selector: &str, layers: &[usize]) -> Result<Network> {
    let entries = load_batch(path).with_context(|| format!("Failed to load batch: {}", path.display()))?;

    let entry = match selector.parse::<usize>() {
        Ok(index) => entries.into_iter().nth(index),
        Err(_) => entries.into_iter().find(|e| e.name == selector),
    };
    let Some(entry) = entry else {
        bail!("No strategy '{}' in {}", selector, path.display());
    };

    let network = entry
        .into_network(layers)
        .with_context(|| format!("Strategy '{}' does not fit layers {:?}", selector, layers))?;
    Ok(network)
}

/// Load every network in a batch, skipping those with the wrong shape
pub fn load_networks(path: &Path, layers: &[usize]) -> Result<Vec<Network>> {
    let entries = load_batch(path).with_context(|| format!("Failed to load batch: {}", path.display()))?;
    let mut networks = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.into_network(layers) {
            Ok(network) => networks.push(network),
            Err(e) => tracing::warn!("Skipping {}: {}", path.display(), e),
        }
    }
    Ok(networks)
}
