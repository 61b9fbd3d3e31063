use crate::datastructures::common::{LeapIndicator, TimeSource};

/// `timePropertiesDS` (§3). Grounded on
/// `statime::datastructures::datasets::TimePropertiesDS`, adapted to carry
/// `leap59`/`leap61` as the mutually-exclusive [`LeapIndicator`] already
/// used by the message header rather than two independent bools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePropertiesDS {
    pub current_utc_offset: i16,
    pub current_utc_offset_valid: bool,
    pub leap_indicator: LeapIndicator,
    pub time_traceable: bool,
    pub frequency_traceable: bool,
    pub ptp_timescale: bool,
    pub time_source: TimeSource,
}

impl TimePropertiesDS {
    pub fn new_ptp(
        current_utc_offset: i16,
        current_utc_offset_valid: bool,
        leap_indicator: LeapIndicator,
        time_traceable: bool,
        frequency_traceable: bool,
        time_source: TimeSource,
    ) -> Self {
        Self {
            current_utc_offset,
            current_utc_offset_valid,
            leap_indicator,
            time_traceable,
            frequency_traceable,
            ptp_timescale: true,
            time_source,
        }
    }

    pub fn new_arbitrary(
        time_traceable: bool,
        frequency_traceable: bool,
        time_source: TimeSource,
    ) -> Self {
        Self {
            current_utc_offset: 0,
            current_utc_offset_valid: false,
            leap_indicator: LeapIndicator::NoLeap,
            time_traceable,
            frequency_traceable,
            ptp_timescale: false,
            time_source,
        }
    }
}

impl Default for TimePropertiesDS {
    fn default() -> Self {
        Self::new_arbitrary(false, false, TimeSource::InternalOscillator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ptp_timescale_flag_distinguishes_constructors() {
        let arbitrary = TimePropertiesDS::new_arbitrary(false, false, TimeSource::InternalOscillator);
        assert!(!arbitrary.ptp_timescale);
        assert!(!arbitrary.current_utc_offset_valid);

        let ptp = TimePropertiesDS::new_ptp(37, true, LeapIndicator::NoLeap, true, true, TimeSource::Gnss);
        assert!(ptp.ptp_timescale);
        assert_eq!(ptp.current_utc_offset, 37);
    }
}
