//! Sheet workflow: run every configured step in order
//!
//! Steps run in sheet order:
//!
//! 1. Pressure to CFM
//! 2. Spray rate
//! 3. Atomizing air volume
//! 4. Atomizing air pressure
//! 5. Bottom screen area
//! 6. Air volume
//!
//! With `chain` enabled, later inputs are overwritten by earlier outputs at
//! full precision:
//!
//! | From | To |
//! |---|---|
//! | spray rate SR1, SR2 | atomizing air volume SR1, SR2; atomizing air pressure SR1, SR2 |
//! | atomizing air volume AAV1, AAV2 | atomizing air pressure (droplet mode) AAV1, AAV2 |
//! | spray rate AV1 | air volume AV1 |
//! | bottom screen A1, A2 | air volume A1, A2 |
//!
//! A step whose upstream step failed keeps its own configured values. A
//! failing step is recorded and the run carries on.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ConfigError;
use crate::core_types::ScaleUpError;
use crate::results::ResultBook;
use crate::steps::{
    AirVolumeInput, AtomizingAirPressureInput, AtomizingAirVolumeInput, BottomScreenInput,
    PressureScaling, PressureToFlowInput, ScaleUpStep, SprayRateInput,
};

/// Inputs for a full sheet run; `None` skips a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleUpWorkflow {
    /// Feed earlier outputs into later inputs
    pub chain: bool,
    /// Pressure to CFM
    pub pressure: Option<PressureToFlowInput>,
    /// Spray rate scale-up
    pub spray_rate: Option<SprayRateInput>,
    /// Atomizing air volume scale-up
    pub atomizing_air_volume: Option<AtomizingAirVolumeInput>,
    /// Atomizing air pressure scale-up
    pub atomizing_air_pressure: Option<AtomizingAirPressureInput>,
    /// Bottom screen areas
    pub bottom_screen: Option<BottomScreenInput>,
    /// Air volume scale-up
    pub air_volume: Option<AirVolumeInput>,
}

impl Default for ScaleUpWorkflow {
    fn default() -> Self {
        Self {
            chain: true,
            pressure: Some(PressureToFlowInput::default()),
            spray_rate: Some(SprayRateInput::default()),
            atomizing_air_volume: Some(AtomizingAirVolumeInput::default()),
            atomizing_air_pressure: Some(AtomizingAirPressureInput::default()),
            bottom_screen: Some(BottomScreenInput::default()),
            air_volume: Some(AirVolumeInput::default()),
        }
    }
}

/// A step that failed during a run
#[derive(Debug, Clone, PartialEq)]
pub struct StepFailure {
    /// Section of the failed step
    pub section: &'static str,
    /// Why it failed
    pub error: ScaleUpError,
}

/// Everything a run produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowOutcome {
    /// Results of the steps that succeeded, in sheet order
    pub book: ResultBook,
    /// Steps that failed, in sheet order
    pub failures: Vec<StepFailure>,
}

impl WorkflowOutcome {
    /// True when every configured step succeeded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record<S: ScaleUpStep>(&mut self, step: &S) -> Option<S::Output> {
        match step.evaluate() {
            Ok((output, result)) => {
                self.book.insert(result);
                Some(output)
            }
            Err(error) => {
                warn!(section = step.section(), %error, "Scale-up step failed");
                self.failures.push(StepFailure {
                    section: step.section(),
                    error,
                });
                None
            }
        }
    }
}

impl ScaleUpWorkflow {
    /// Workflow with no steps configured
    pub fn empty() -> Self {
        Self {
            chain: true,
            pressure: None,
            spray_rate: None,
            atomizing_air_volume: None,
            atomizing_air_pressure: None,
            bottom_screen: None,
            air_volume: None,
        }
    }

    /// Switch atomizing air pressure to the droplet-size rule
    ///
    /// AAV1 is the atomizing air volume step's lab value. AAV2 is
    /// `pilot_atomizing_air_volume` when given, otherwise that step's computed
    /// pilot value. A pressure step already in droplet mode keeps its volumes
    /// unless an AAV2 is given. With `chain` on, a successful atomizing air
    /// volume step still replaces both at run time.
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] when no AAV2 is given and the atomizing air
    /// volume step is missing or cannot be computed.
    pub fn use_droplet_pressure(
        &mut self,
        pilot_atomizing_air_volume: Option<f64>,
    ) -> Result<(), ConfigError> {
        if let Some(input) = self.atomizing_air_pressure.as_mut() {
            if let PressureScaling::DropletSize {
                pilot_atomizing_air_volume: configured,
                ..
            } = &mut input.scaling
            {
                if let Some(aav2) = pilot_atomizing_air_volume {
                    *configured = aav2;
                }
                return Ok(());
            }
        }

        let volume = self.atomizing_air_volume;
        let aav2 = match (pilot_atomizing_air_volume, volume) {
            (Some(aav2), _) => aav2,
            (None, Some(volume)) => volume.compute().map_err(|e| {
                ConfigError::Invalid(format!("droplet-size pressure needs AAV2: {e}"))
            })?,
            (None, None) => {
                return Err(ConfigError::Invalid(
                    "droplet-size pressure needs a pilot atomizing air volume (AAV2)".into(),
                ));
            }
        };

        let input = self
            .atomizing_air_pressure
            .get_or_insert_with(Default::default);
        input.scaling = PressureScaling::DropletSize {
            lab_atomizing_air_volume: volume.unwrap_or_default().lab_atomizing_air_volume,
            pilot_atomizing_air_volume: aav2,
        };
        Ok(())
    }

    /// Run every configured step
    pub fn run(&self) -> WorkflowOutcome {
        let mut outcome = WorkflowOutcome::default();
        let chain = self.chain;

        if let Some(input) = &self.pressure {
            outcome.record(input);
        }

        let spray = self
            .spray_rate
            .and_then(|input| outcome.record(&input).map(|sr2| (input, sr2)));

        let atomizing_volume = self.atomizing_air_volume.and_then(|mut input| {
            if let (true, Some((spray, sr2))) = (chain, spray) {
                input.lab_spray_rate = spray.lab_spray_rate;
                input.pilot_spray_rate = sr2;
            }
            outcome.record(&input).map(|aav2| (input, aav2))
        });

        if let Some(mut input) = self.atomizing_air_pressure {
            if chain {
                if let Some((spray, sr2)) = spray {
                    input.lab_spray_rate = spray.lab_spray_rate;
                    input.pilot_spray_rate = sr2;
                }
                if let (PressureScaling::DropletSize { .. }, Some((volume, aav2))) =
                    (input.scaling, atomizing_volume)
                {
                    input.scaling = PressureScaling::DropletSize {
                        lab_atomizing_air_volume: volume.lab_atomizing_air_volume,
                        pilot_atomizing_air_volume: aav2,
                    };
                }
            }
            outcome.record(&input);
        }

        let areas = self.bottom_screen.and_then(|input| outcome.record(&input));

        if let Some(mut input) = self.air_volume {
            if chain {
                if let Some((spray, _)) = spray {
                    input.lab_air_volume = spray.lab_air_volume;
                }
                if let Some(areas) = areas {
                    input.lab_area = areas.lab;
                    input.pilot_area = areas.pilot;
                }
            }
            outcome.record(&input);
        }

        info!(
            computed = outcome.book.len(),
            failed = outcome.failures.len(),
            "Scale-up workflow finished"
        );
        outcome
    }
}
