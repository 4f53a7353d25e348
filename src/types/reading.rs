//! Sensor reading snapshot consumed by the predictors

use serde::{Deserialize, Deserializer, Serialize};

/// Instantaneous top drive measurements.
///
/// Every field is optional. A field that is absent, `null`, non-numeric
/// (e.g. `"3.45"`) or non-finite decodes to `None`, and the prediction rules
/// that depend on it are skipped instead of failing the whole snapshot.
/// A section that is `null` or not an object decodes as empty.
///
/// JSON shape:
///
/// ```json
/// {
///   "vibration": { "level": 3.2, "mainBearingTemp": 62.0 },
///   "hydraulic": { "pressure": 3700.0, "flowRate": 130.0 },
///   "acoustic":  { "level": 78.0 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    #[serde(default, deserialize_with = "lenient_section")]
    pub vibration: VibrationReading,
    #[serde(default, deserialize_with = "lenient_section")]
    pub hydraulic: HydraulicReading,
    #[serde(default, deserialize_with = "lenient_section")]
    pub acoustic: AcousticReading,
}

/// Vibration / temperature channel group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VibrationReading {
    /// Overall vibration level (mm/s), observed ~0-10
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,
    /// Main bearing temperature (°C), observed ~40-100
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub main_bearing_temp: Option<f64>,
}

/// Hydraulic system channel group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydraulicReading {
    /// System pressure (psi), observed ~1500-4500
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Flow rate (gpm), observed ~50-160
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub flow_rate: Option<f64>,
}

/// Acoustic channel group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcousticReading {
    /// Sound pressure level (dB), observed ~60-120
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,
}

impl SensorReading {
    /// Empty reading: every channel missing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vibration_level(mut self, value: f64) -> Self {
        self.vibration.level = Some(value);
        self
    }

    pub fn with_bearing_temp(mut self, value: f64) -> Self {
        self.vibration.main_bearing_temp = Some(value);
        self
    }

    pub fn with_pressure(mut self, value: f64) -> Self {
        self.hydraulic.pressure = Some(value);
        self
    }

    pub fn with_flow_rate(mut self, value: f64) -> Self {
        self.hydraulic.flow_rate = Some(value);
        self
    }

    pub fn with_acoustic_level(mut self, value: f64) -> Self {
        self.acoustic.level = Some(value);
        self
    }

    // Accessors re-check finiteness so programmatically built readings
    // obey the same missing-field policy as decoded ones.

    pub fn vibration_level(&self) -> Option<f64> {
        finite(self.vibration.level)
    }

    pub fn bearing_temp(&self) -> Option<f64> {
        finite(self.vibration.main_bearing_temp)
    }

    pub fn pressure(&self) -> Option<f64> {
        finite(self.hydraulic.pressure)
    }

    pub fn flow_rate(&self) -> Option<f64> {
        finite(self.hydraulic.flow_rate)
    }

    pub fn acoustic_level(&self) -> Option<f64> {
        finite(self.acoustic.level)
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Decode a JSON number into `Some(f64)`; anything else becomes `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Number(f64),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Lenient::deserialize(deserializer)? {
        Lenient::Number(v) if v.is_finite() => Some(v),
        Lenient::Number(_) | Lenient::Other(_) => None,
    })
}

/// Decode a channel group; `null` and scalars become an empty group.
fn lenient_section<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        Section(T),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Section(section) => section,
        Lenient::Other(_) => T::default(),
    })
}
