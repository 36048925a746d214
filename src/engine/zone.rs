use crate::domain::{Zone, ZoneInfo, ZoneSignal};

/// Lower bound of the Weak Zone; everything under it sits below the top beam.
pub const BEAM_ZONE_END: u32 = 226;
pub const WEAK_ZONE_END: u32 = 500;
pub const MIDDLE_ZONE_END: u32 = 700;
/// Inclusive upper bound of the Dip Buy Zone.
pub const DIP_BUY_ZONE_LAST: u32 = 888;

/// Classify a coordinate into its band.
///
/// Bands are `[0,226) [226,500) [500,700) [700,888] (888,1000)`. Values past
/// 999 cannot come out of the mapper and fall into the Rocket Zone.
pub fn classify(coordinate: u32) -> ZoneInfo {
    let zone = zone_of(coordinate);
    let (name, signal, description) = match zone {
        Zone::Beam => (
            "Beam Zone",
            ZoneSignal::Bearish,
            "Resistance cluster under the 226/113/86 beams; breaks here tend to extend lower",
        ),
        Zone::Weak => (
            "Weak Zone",
            ZoneSignal::Neutral,
            "Weak lower-half structure above the beams; no edge either way",
        ),
        Zone::Middle => (
            "Middle Zone",
            ZoneSignal::Neutral,
            "Mid-cycle chop between support and the dip-buy band",
        ),
        Zone::DipBuy => (
            "Dip Buy Zone",
            ZoneSignal::Opportunity,
            "Upper-cycle pullback band where dips have historically been bought",
        ),
        Zone::Rocket => (
            "Rocket Zone",
            ZoneSignal::Bullish,
            "Pressing toward the next whole number; breakout territory",
        ),
    };

    ZoneInfo {
        zone,
        name: name.to_string(),
        signal,
        description: description.to_string(),
    }
}

fn zone_of(coordinate: u32) -> Zone {
    match coordinate {
        c if c < BEAM_ZONE_END => Zone::Beam,
        c if c < WEAK_ZONE_END => Zone::Weak,
        c if c < MIDDLE_ZONE_END => Zone::Middle,
        c if c <= DIP_BUY_ZONE_LAST => Zone::DipBuy,
        _ => Zone::Rocket,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let cases = [
            (0, Zone::Beam, ZoneSignal::Bearish),
            (225, Zone::Beam, ZoneSignal::Bearish),
            (226, Zone::Weak, ZoneSignal::Neutral),
            (499, Zone::Weak, ZoneSignal::Neutral),
            (500, Zone::Middle, ZoneSignal::Neutral),
            (699, Zone::Middle, ZoneSignal::Neutral),
            (700, Zone::DipBuy, ZoneSignal::Opportunity),
            (888, Zone::DipBuy, ZoneSignal::Opportunity),
            (889, Zone::Rocket, ZoneSignal::Bullish),
            (999, Zone::Rocket, ZoneSignal::Bullish),
        ];
        for (coordinate, zone, signal) in cases {
            let info = classify(coordinate);
            assert_eq!(info.zone, zone, "zone for {}", coordinate);
            assert_eq!(info.signal, signal, "signal for {}", coordinate);
        }
    }

    #[test]
    fn test_total_over_domain() {
        let mut counts = [0usize; 5];
        for coordinate in 0..1000 {
            let idx = match classify(coordinate).zone {
                Zone::Beam => 0,
                Zone::Weak => 1,
                Zone::Middle => 2,
                Zone::DipBuy => 3,
                Zone::Rocket => 4,
            };
            counts[idx] += 1;
        }
        assert_eq!(counts, [226, 274, 200, 189, 111]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(classify(100).name, "Beam Zone");
        assert_eq!(classify(300).name, "Weak Zone");
        assert_eq!(classify(600).name, "Middle Zone");
        assert_eq!(classify(750).name, "Dip Buy Zone");
        assert_eq!(classify(950).name, "Rocket Zone");
        assert!(!classify(950).description.is_empty());
    }
}
