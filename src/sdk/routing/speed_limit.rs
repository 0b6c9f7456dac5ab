use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unit a speed limit is posted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedUnit {
    #[serde(rename = "km/h")]
    KilometersPerHour,
    #[serde(rename = "mph")]
    MilesPerHour,
}

/// A speed limit annotation for one road segment.
///
/// The wire shape is a tagged union keyed by field presence:
/// `{"speed": 55.0, "unit": "mph"}`, `{"unknown": true}` or
/// `{"none": true}` (no limit applies, e.g. a motorway without one).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedLimitDescriptor {
    Some { speed: f64, unit: SpeedUnit },
    Unknown,
    None,
}

impl SpeedLimitDescriptor {
    /// A missing speed means the limit is unknown; an infinite speed means
    /// no limit applies.
    pub fn from_speed(speed: Option<f64>, unit: SpeedUnit) -> Self {
        match speed {
            None => SpeedLimitDescriptor::Unknown,
            Some(value) if value.is_infinite() => SpeedLimitDescriptor::None,
            Some(value) => SpeedLimitDescriptor::Some { speed: value, unit },
        }
    }

    /// The posted speed, or infinity when no limit applies.
    pub fn speed(&self) -> Option<(f64, SpeedUnit)> {
        match *self {
            SpeedLimitDescriptor::Some { speed, unit } => Some((speed, unit)),
            SpeedLimitDescriptor::None => {
                Some((f64::INFINITY, SpeedUnit::KilometersPerHour))
            }
            SpeedLimitDescriptor::Unknown => None,
        }
    }
}

// Wire mirror; exactly one of the three shapes is populated.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<SpeedUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unknown: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    none: Option<bool>,
}

impl Serialize for SpeedLimitDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = match *self {
            // An infinite speed is only representable as the `none` shape.
            SpeedLimitDescriptor::Some { speed, .. } if speed.is_infinite() => RawDescriptor {
                none: Some(true),
                ..RawDescriptor::default()
            },
            SpeedLimitDescriptor::Some { speed, unit } => RawDescriptor {
                speed: Some(speed),
                unit: Some(unit),
                ..RawDescriptor::default()
            },
            SpeedLimitDescriptor::Unknown => RawDescriptor {
                unknown: Some(true),
                ..RawDescriptor::default()
            },
            SpeedLimitDescriptor::None => RawDescriptor {
                none: Some(true),
                ..RawDescriptor::default()
            },
        };
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SpeedLimitDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawDescriptor::deserialize(deserializer)?;
        if raw.unknown.unwrap_or(false) {
            return Ok(SpeedLimitDescriptor::Unknown);
        }
        if raw.none.unwrap_or(false) {
            return Ok(SpeedLimitDescriptor::None);
        }
        match (raw.speed, raw.unit) {
            (Some(speed), _) if speed.is_infinite() => Ok(SpeedLimitDescriptor::None),
            (Some(speed), Some(unit)) => Ok(SpeedLimitDescriptor::Some { speed, unit }),
            (Some(_), None) => Err(D::Error::missing_field("unit")),
            (None, _) => Err(D::Error::custom(
                "expected one of `speed`, `unknown` or `none`",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn round_trip(value: serde_json::Value) -> (SpeedLimitDescriptor, serde_json::Value) {
        let decoded: SpeedLimitDescriptor = serde_json::from_value(value).unwrap();
        let encoded = serde_json::to_value(decoded).unwrap();
        let redecoded: SpeedLimitDescriptor = serde_json::from_value(encoded.clone()).unwrap();
        assert_eq!(decoded, redecoded);
        (decoded, encoded)
    }

    #[test]
    fn speed_shape_round_trips() {
        let (decoded, encoded) = round_trip(json!({"speed": 55.0, "unit": "mph"}));
        assert_eq!(
            decoded,
            SpeedLimitDescriptor::Some {
                speed: 55.0,
                unit: SpeedUnit::MilesPerHour,
            }
        );
        assert_eq!(encoded, json!({"speed": 55.0, "unit": "mph"}));

        let (decoded, _) = round_trip(json!({"speed": 80.0, "unit": "km/h"}));
        assert_eq!(
            decoded,
            SpeedLimitDescriptor::Some {
                speed: 80.0,
                unit: SpeedUnit::KilometersPerHour,
            }
        );
    }

    #[test]
    fn unknown_and_none_shapes_round_trip() {
        let (decoded, encoded) = round_trip(json!({"unknown": true}));
        assert_eq!(decoded, SpeedLimitDescriptor::Unknown);
        assert_eq!(encoded, json!({"unknown": true}));

        let (decoded, encoded) = round_trip(json!({"none": true}));
        assert_eq!(decoded, SpeedLimitDescriptor::None);
        assert_eq!(encoded, json!({"none": true}));
    }

    #[test]
    fn infinite_speed_maps_to_the_none_shape() {
        let descriptor = SpeedLimitDescriptor::Some {
            speed: f64::INFINITY,
            unit: SpeedUnit::KilometersPerHour,
        };
        let encoded = serde_json::to_value(descriptor).unwrap();
        assert_eq!(encoded, json!({"none": true}));

        // The same value survives a decode of its own encoding.
        let decoded: SpeedLimitDescriptor = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, SpeedLimitDescriptor::None);
    }

    #[test]
    fn from_speed_covers_all_three_cases() {
        assert_eq!(
            SpeedLimitDescriptor::from_speed(None, SpeedUnit::MilesPerHour),
            SpeedLimitDescriptor::Unknown
        );
        assert_eq!(
            SpeedLimitDescriptor::from_speed(Some(f64::INFINITY), SpeedUnit::MilesPerHour),
            SpeedLimitDescriptor::None
        );
        assert_eq!(
            SpeedLimitDescriptor::from_speed(Some(48.0), SpeedUnit::KilometersPerHour),
            SpeedLimitDescriptor::Some {
                speed: 48.0,
                unit: SpeedUnit::KilometersPerHour,
            }
        );
    }

    #[test]
    fn speed_shape_without_unit_is_rejected() {
        assert!(serde_json::from_value::<SpeedLimitDescriptor>(json!({"speed": 55.0})).is_err());
        assert!(serde_json::from_value::<SpeedLimitDescriptor>(json!({})).is_err());
    }
}
