//! Motor brackets and nameplate parts.

/// Largest brake horsepower a motor bracket may carry on a given fan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MotorRating {
    pub hp: f64,
    pub max_bhp: f64,
}

impl MotorRating {
    const fn new(hp: f64, max_bhp: f64) -> Self {
        Self { hp, max_bhp }
    }
}

pub(crate) const RATINGS_10_10B: [MotorRating; 5] = [
    MotorRating::new(1.0, 0.518_943_601_620_776_7),
    MotorRating::new(1.5, 0.778_415_402_431_165),
    MotorRating::new(2.0, 1.037_887_203_241_553_4),
    MotorRating::new(3.0, 1.556_830_804_862_33),
    MotorRating::new(5.0, 2.594_718_008_103_883),
];

pub(crate) const RATINGS_W10_10BL: [MotorRating; 5] = [
    MotorRating::new(1.0, 0.537_278_307_959_123_3),
    MotorRating::new(1.5, 0.805_917_461_938_685_1),
    MotorRating::new(2.0, 1.074_556_615_918_246_7),
    MotorRating::new(3.0, 1.611_834_923_877_370_2),
    MotorRating::new(5.0, 2.686_391_539_795_616_6),
];

/// The 9-6 frame does not take motors above 2 HP.
pub(crate) const RATINGS_9_6B: [MotorRating; 3] = [
    MotorRating::new(1.0, 0.623_280_975_016_803_8),
    MotorRating::new(1.5, 0.934_921_462_525_205_7),
    MotorRating::new(2.0, 1.246_561_950_033_607_6),
];

pub(crate) const RATINGS_W9_6BL: [MotorRating; 3] = [
    MotorRating::new(1.0, 15.0),
    MotorRating::new(1.5, 15.0),
    MotorRating::new(2.0, 15.0),
];

/// The chosen bracket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MotorChoice {
    pub hp: f64,
    /// The load exceeded every bracket and the largest was taken.
    pub oversized: bool,
}

/// Picks the smallest bracket whose rating covers `bhp`.
///
/// Returns `None` only for an empty rating table.
pub(crate) fn select_motor(ratings: &[MotorRating], bhp: f64) -> Option<MotorChoice> {
    if let Some(rating) = ratings.iter().find(|r| bhp <= r.max_bhp) {
        return Some(MotorChoice {
            hp: rating.hp,
            oversized: false,
        });
    }
    ratings.last().map(|largest| MotorChoice {
        hp: largest.hp,
        oversized: true,
    })
}

/// A stocked motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MotorPart {
    pub shaft: &'static str,
    pub part_number: &'static str,
    pub model: &'static str,
}

const MOTOR_PARTS: [(f64, MotorPart); 5] = [
    (
        1.0,
        MotorPart {
            shaft: "7/8",
            part_number: "VELMTR-0183",
            model: "143TTDR6027",
        },
    ),
    (
        1.5,
        MotorPart {
            shaft: "7/8",
            part_number: "VELMTR-0138",
            model: "145TTDR6028",
        },
    ),
    (
        2.0,
        MotorPart {
            shaft: "7/8",
            part_number: "VELMTR-0139",
            model: "145TTDR6029",
        },
    ),
    (
        3.0,
        MotorPart {
            shaft: "1-1/8",
            part_number: "VELMTR-0140",
            model: "182TTDB6026",
        },
    ),
    (
        5.0,
        MotorPart {
            shaft: "1-1/8",
            part_number: "VELMTR-0141",
            model: "184TTDB6026",
        },
    ),
];

pub(crate) fn motor_part(hp: f64) -> Option<&'static MotorPart> {
    MOTOR_PARTS
        .iter()
        .find(|(rated_hp, _)| *rated_hp == hp)
        .map(|(_, part)| part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smallest_covering_bracket() {
        let choice = select_motor(&RATINGS_10_10B, 0.6).unwrap();
        assert_eq!(
            choice,
            MotorChoice {
                hp: 1.5,
                oversized: false
            }
        );

        let choice = select_motor(&RATINGS_10_10B, 0.518_943_601_620_776_7).unwrap();
        assert_eq!(choice.hp, 1.0);
    }

    #[test]
    fn overload_takes_largest_bracket() {
        let choice = select_motor(&RATINGS_9_6B, 1.3).unwrap();
        assert_eq!(
            choice,
            MotorChoice {
                hp: 2.0,
                oversized: true
            }
        );
        assert!(select_motor(&[], 1.0).is_none());
    }

    #[test]
    fn every_bracket_has_a_part() {
        for rating in RATINGS_10_10B.iter().chain(&RATINGS_W10_10BL) {
            assert!(motor_part(rating.hp).is_some(), "{} HP", rating.hp);
        }
        assert_eq!(motor_part(3.0).map(|p| p.shaft), Some("1-1/8"));
        assert!(motor_part(7.5).is_none());
    }
}
