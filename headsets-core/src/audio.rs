use crate::items::{ItemCatalog, ItemProps, ItemTemplate};

/// Audio properties a headset template may carry in `_props`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AudioField {
    AmbientVolume,
    HeadphonesMixerVolume,
    CompressorGain,
    CompressorThreshold,
    EqBand1Gain,
    EqBand2Gain,
    EqBand3Gain,
    HighpassFreq,
    DryVolume,
    RolloffMultiplier,
    ClientPlayerCompressorSendLevel,
    Distortion,
    NpcCompressorSendLevel,
    ObservedPlayerCompressorSendLevel,
    EnvCommonCompressorSendLevel,
    EnvNatureCompressorSendLevel,
    EnvTechnicalCompressorSendLevel,
}

impl AudioField {
    pub const fn key(self) -> &'static str {
        match self {
            AudioField::AmbientVolume => "AmbientVolume",
            AudioField::HeadphonesMixerVolume => "HeadphonesMixerVolume",
            AudioField::CompressorGain => "CompressorGain",
            AudioField::CompressorThreshold => "CompressorThreshold",
            AudioField::EqBand1Gain => "EQBand1Gain",
            AudioField::EqBand2Gain => "EQBand2Gain",
            AudioField::EqBand3Gain => "EQBand3Gain",
            AudioField::HighpassFreq => "HighpassFreq",
            AudioField::DryVolume => "DryVolume",
            AudioField::RolloffMultiplier => "RolloffMultiplier",
            AudioField::ClientPlayerCompressorSendLevel => "ClientPlayerCompressorSendLevel",
            AudioField::Distortion => "Distortion",
            AudioField::NpcCompressorSendLevel => "NpcCompressorSendLevel",
            AudioField::ObservedPlayerCompressorSendLevel => "ObservedPlayerCompressorSendLevel",
            AudioField::EnvCommonCompressorSendLevel => "EnvCommonCompressorSendLevel",
            AudioField::EnvNatureCompressorSendLevel => "EnvNatureCompressorSendLevel",
            AudioField::EnvTechnicalCompressorSendLevel => "EnvTechnicalCompressorSendLevel",
        }
    }
}

/// A template is a headset only if every one of these is a number.
pub const GATE_FIELDS: [AudioField; 9] = [
    AudioField::AmbientVolume,
    AudioField::HeadphonesMixerVolume,
    AudioField::CompressorGain,
    AudioField::CompressorThreshold,
    AudioField::EqBand1Gain,
    AudioField::EqBand2Gain,
    AudioField::EqBand3Gain,
    AudioField::HighpassFreq,
    AudioField::DryVolume,
];

/// How one property is rewritten.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Rule {
    Set(f64),
    /// `value * factor`, clamped to `[min, max]`.
    ScaleClamped { factor: f64, min: f64, max: f64 },
    /// `min(max(floor, value), ceil)`. The floor does not depend on the
    /// input's scale.
    Window { floor: f64, ceil: f64 },
    /// `min(value * factor, cap)`.
    ScaleCapped { factor: f64, cap: f64 },
    /// `seed` when the value is zero, `value * factor` otherwise.
    SeedOrScale { seed: f64, factor: f64 },
    /// `max(value + offset, floor)`.
    ShiftFloored { offset: f64, floor: f64 },
}

impl Rule {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Rule::Set(v) => v,
            Rule::ScaleClamped { factor, min, max } => (value * factor).min(max).max(min),
            Rule::Window { floor, ceil } => value.max(floor).min(ceil),
            Rule::ScaleCapped { factor, cap } => (value * factor).min(cap),
            Rule::SeedOrScale { seed, factor } => {
                if value == 0.0 {
                    seed
                } else {
                    value * factor
                }
            }
            Rule::ShiftFloored { offset, floor } => (value + offset).max(floor),
        }
    }
}

const fn scale(factor: f64, min: f64, max: f64) -> Rule {
    Rule::ScaleClamped { factor, min, max }
}

const fn shift(offset: f64, floor: f64) -> Rule {
    Rule::ShiftFloored { offset, floor }
}

const SEND_BOOST: Rule = Rule::SeedOrScale { seed: 12.0, factor: 12.0 };

/// The full headset tuning. Each field appears once, so a single pass
/// touches a property at most once.
pub const HEADSET_RULES: [(AudioField, Rule); 17] = [
    (AudioField::ClientPlayerCompressorSendLevel, Rule::Set(12.0)),
    // stronger ambient reduction
    (AudioField::AmbientVolume, scale(3.0, -50.0, 50.0)),
    (AudioField::HeadphonesMixerVolume, scale(2.0, -10.0, 10.0)),
    (AudioField::CompressorGain, scale(1.6, 0.0, 20.0)),
    (AudioField::CompressorThreshold, scale(1.2, -80.0, -10.0)),
    (AudioField::EqBand1Gain, scale(1.5, 0.0, 5.0)),
    (AudioField::EqBand2Gain, scale(1.5, 0.0, 5.0)),
    (AudioField::EqBand3Gain, scale(1.5, 0.0, 5.0)),
    // lets more bass through
    (AudioField::HighpassFreq, scale(0.75, 50.0, 1000.0)),
    (AudioField::DryVolume, scale(0.7, -60.0, 0.0)),
    (AudioField::RolloffMultiplier, Rule::Window { floor: 1.15, ceil: 1.35 }),
    (AudioField::Distortion, Rule::ScaleCapped { factor: 1.2, cap: 1.0 }),
    // footsteps dominate
    (AudioField::NpcCompressorSendLevel, SEND_BOOST),
    (AudioField::ObservedPlayerCompressorSendLevel, SEND_BOOST),
    (AudioField::EnvCommonCompressorSendLevel, shift(12.0, 12.0)),
    (AudioField::EnvNatureCompressorSendLevel, shift(-5.0, -5.0)),
    (AudioField::EnvTechnicalCompressorSendLevel, shift(12.0, 12.0)),
];

pub fn is_headset(props: &ItemProps<'_>) -> bool {
    GATE_FIELDS.iter().all(|f| props.number(f.key()).is_some())
}

/// Applies [`HEADSET_RULES`] to one template in place and returns how many
/// properties were rewritten. Templates that are not headsets come back
/// untouched with a count of zero.
pub fn deep_fry(item: &mut ItemTemplate) -> usize {
    let (id, props) = item.id_and_props_mut();
    let Some(mut props) = props else {
        return 0;
    };
    if !is_headset(&props) {
        return 0;
    }

    let mut written = 0;
    for (field, rule) in HEADSET_RULES {
        let key = field.key();
        let Some(value) = props.number(key) else {
            continue;
        };
        let tuned = rule.apply(value);
        if props.set_number(key, tuned) {
            written += 1;
        } else {
            tracing::warn!(
                "{}: {} = {} tunes to a non-finite value, left as is",
                id,
                key,
                value
            );
        }
    }

    tracing::debug!("Tuned headset {} ({} properties)", id, written);
    written
}

/// Counters from one pass over the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub scanned: usize,
    pub headsets: usize,
    pub properties: usize,
}

/// Runs [`deep_fry`] over every template.
///
/// Not idempotent: a second pass compounds the multiplicative rules (ambient
/// volume triples again) until the clamps saturate. The host is expected to
/// call this once per process.
pub fn apply_to_catalog(items: &mut ItemCatalog) -> PassSummary {
    let mut summary = PassSummary::default();
    for item in items.values_mut() {
        summary.scanned += 1;
        let written = deep_fry(item);
        if written > 0 {
            summary.headsets += 1;
            summary.properties += written;
        }
    }
    summary
}
