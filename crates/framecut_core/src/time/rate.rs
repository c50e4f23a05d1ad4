//! Exact frame rates.

use std::fmt;
use std::str::FromStr;

use num_rational::Ratio;
use serde::{Deserialize, Serialize};

use crate::error::{TrimError, TrimResult};

/// An exact duration in seconds.
pub type Seconds = Ratio<u128>;

/// NTSC rates that decimal input like `23.976` is snapped to.
const NTSC_BASES: [u64; 5] = [24, 30, 48, 60, 120];

/// A frame rate as an exact ratio of frames per second.
///
/// Always stored reduced, so `48/2` and `24/1` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FrameRate {
    num: u64,
    den: u64,
}

impl FrameRate {
    /// Create a rate of `num / den` frames per second.
    pub fn new(num: u64, den: u64) -> TrimResult<Self> {
        if num == 0 || den == 0 {
            return Err(TrimError::invalid_rate(format!(
                "{}/{} must have a positive numerator and denominator",
                num, den
            )));
        }
        let reduced = Ratio::new(num, den);
        Ok(Self {
            num: *reduced.numer(),
            den: *reduced.denom(),
        })
    }

    /// Create an integer rate such as 25 fps.
    pub fn from_integer(fps: u64) -> TrimResult<Self> {
        Self::new(fps, 1)
    }

    pub fn num(&self) -> u64 {
        self.num
    }

    pub fn den(&self) -> u64 {
        self.den
    }

    /// Exact start time of `frame`, counted from frame 0.
    pub fn seconds_at(&self, frame: u64) -> Seconds {
        Ratio::new(frame as u128 * self.den as u128, self.num as u128)
    }

    fn from_decimal(s: &str) -> TrimResult<Self> {
        let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
        let digits = format!("{}{}", int_part, frac_part);
        let num: u64 = digits
            .parse()
            .map_err(|_| TrimError::invalid_rate(format!("'{}' is not a number", s)))?;
        let den = 10u64
            .checked_pow(frac_part.len() as u32)
            .ok_or_else(|| TrimError::invalid_rate(format!("'{}' has too many digits", s)))?;
        let exact = Self::new(num, den)?;
        Ok(exact.snap_ntsc().unwrap_or(exact))
    }

    /// Map a rounded decimal like 29.97 to its exact NTSC ratio.
    fn snap_ntsc(&self) -> Option<Self> {
        if self.den == 1 {
            return None;
        }
        let value = Ratio::new(self.num as u128, self.den as u128);
        let tolerance = Ratio::new(1u128, 100);
        NTSC_BASES.iter().find_map(|&base| {
            let ntsc = Ratio::new(base as u128 * 1000, 1001);
            let diff = if value > ntsc {
                value - ntsc
            } else {
                ntsc - value
            };
            (diff < tolerance).then(|| Self {
                num: base * 1000,
                den: 1001,
            })
        })
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl FromStr for FrameRate {
    type Err = TrimError;

    /// Parse `"24000/1001"`, `"25"` or a decimal such as `"23.976"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((num, den)) = s.split_once('/') {
            let num = num
                .trim()
                .parse()
                .map_err(|_| TrimError::invalid_rate(format!("bad numerator in '{}'", s)))?;
            let den = den
                .trim()
                .parse()
                .map_err(|_| TrimError::invalid_rate(format!("bad denominator in '{}'", s)))?;
            return Self::new(num, den);
        }
        Self::from_decimal(s)
    }
}

impl TryFrom<String> for FrameRate {
    type Error = TrimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FrameRate> for String {
    fn from(value: FrameRate) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_on_construction() {
        assert_eq!(FrameRate::new(48, 2).unwrap(), FrameRate::new(24, 1).unwrap());
        assert_eq!(FrameRate::new(48000, 2002).unwrap().num(), 24000);
    }

    #[test]
    fn rejects_zero_terms() {
        assert!(FrameRate::new(0, 1).is_err());
        assert!(FrameRate::new(24, 0).is_err());
    }

    #[test]
    fn parses_ratio_integer_and_decimal() {
        assert_eq!("24000/1001".parse::<FrameRate>().unwrap().den(), 1001);
        assert_eq!("25".parse::<FrameRate>().unwrap(), FrameRate::from_integer(25).unwrap());
        assert_eq!(
            "12.5".parse::<FrameRate>().unwrap(),
            FrameRate::new(25, 2).unwrap()
        );
        assert!("abc".parse::<FrameRate>().is_err());
        assert!("24/x".parse::<FrameRate>().is_err());
    }

    #[test]
    fn decimal_ntsc_snaps_to_exact_ratio() {
        let rate: FrameRate = "23.976".parse().unwrap();
        assert_eq!((rate.num(), rate.den()), (24000, 1001));
        let rate: FrameRate = "29.97".parse().unwrap();
        assert_eq!((rate.num(), rate.den()), (30000, 1001));
    }

    #[test]
    fn seconds_are_exact() {
        let rate = FrameRate::new(24000, 1001).unwrap();
        assert_eq!(rate.seconds_at(24000), Ratio::from_integer(1001));
        assert_eq!(rate.seconds_at(1), Ratio::new(1001, 24000));
    }

    #[test]
    fn display_round_trips_through_string() {
        let rate = FrameRate::new(30000, 1001).unwrap();
        let s: String = rate.into();
        assert_eq!(s, "30000/1001");
        assert_eq!(FrameRate::try_from(s).unwrap(), rate);
    }
}
