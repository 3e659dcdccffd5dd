//! Simulated companion application.
//!
//! Plays the phone side of the protocol: announces `ready` on start, and on
//! `update_all` / `update_single` computes visibility scores from hourly
//! weather samples and replies with `new_scores` / `new_score`.
//!
//! # Scoring
//!
//! Each region has three observation points along the line of sight to the
//! mountain. For every point the hourly samples of a time period are scored
//! and folded into a running pairwise average. Point averages are then
//! weighted by `exp(-0.1 * distance_km)` so the observer's own location counts
//! most, and the final score is `round(Σ score·w / Σ w)`.
//!
//! Weather samples come from a [`WeatherSource`]. The simulator uses
//! [`SimulatedWeather`], which synthesises plausible samples from a seeded
//! generator instead of querying a forecast service.

use fastrand::Rng;
use visibility_common::message::{Dictionary, InboundMessage, OutboundRequest, ScoreSet};
use visibility_common::{Region, Score, TimePeriod};

// =============================================================================
// Observation Points
// =============================================================================

/// A location from which weather is sampled.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ObservationPoint {
    pub lat: f64,
    pub long: f64,
    /// Distance from the region's observer location.
    pub distance_km: f64,
}

const fn point(
    lat: f64,
    long: f64,
    distance_km: f64,
) -> ObservationPoint {
    ObservationPoint { lat, long, distance_km }
}

/// Observer, mid-point and approach for the northern side.
pub const NORTH_POINTS: [ObservationPoint; 3] =
    [point(35.5, 138.75, 0.0), point(35.45, 138.75, 5.55), point(35.4, 138.75, 11.09)];

/// Observer, mid-point and approach for the southern side.
pub const SOUTH_POINTS: [ObservationPoint; 3] =
    [point(35.2, 138.6875, 0.0), point(35.25, 138.6875, 5.55), point(35.3, 138.75, 12.47)];

/// Observation points for a region.
pub const fn observation_points(region: Region) -> &'static [ObservationPoint; 3] {
    match region {
        Region::North => &NORTH_POINTS,
        Region::South => &SOUTH_POINTS,
    }
}

/// Atmospheric dampening applied per region.
pub const fn region_dampening(region: Region) -> f64 {
    match region {
        Region::North => 1.0,
        Region::South => 0.75,
    }
}

// =============================================================================
// Scoring
// =============================================================================

/// Forecast values for one hour at one point.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WeatherSample {
    /// Low cloud cover, percent.
    pub cloud_cover_low: f64,
    /// Relative humidity at 2 m, percent.
    pub relative_humidity: f64,
    /// WMO weather code.
    pub weather_code: u8,
    /// Precipitation, mm.
    pub precipitation: f64,
}

impl WeatherSample {
    /// Clear, dry hour.
    pub const CLEAR: Self = Self {
        cloud_cover_low: 0.0,
        relative_humidity: 40.0,
        weather_code: 0,
        precipitation: 0.0,
    };
}

/// WMO codes for heavy rain, snow and thunderstorms.
const HEAVY_WEATHER_CODES: [u8; 7] = [65, 67, 75, 77, 95, 96, 99];

/// Precipitation above which the mountain is never visible.
const HEAVY_RAIN_MM: f64 = 5.0;

/// Score one hourly sample (0 for disqualifying weather, otherwise 1..=10).
pub fn visibility_score(
    sample: &WeatherSample,
    region: Region,
) -> f64 {
    let code = sample.weather_code;
    if (45..=48).contains(&code) || HEAVY_WEATHER_CODES.contains(&code) || sample.precipitation > HEAVY_RAIN_MM {
        return 0.0;
    }

    let mut score = 10.0 * (1.0 - sample.cloud_cover_low / 100.0);

    score *= if sample.relative_humidity > 80.0 {
        0.3
    } else if sample.relative_humidity > 60.0 {
        0.7
    } else {
        1.0
    };

    if code == 3 {
        score *= 0.4; // overcast
    } else if (51..=67).contains(&code) {
        score *= 0.6; // drizzle or rain
    }

    (score * region_dampening(region)).clamp(1.0, 10.0).round()
}

/// Fold hourly scores into a running pairwise average.
///
/// Later hours weigh more than earlier ones. `None` for an empty series.
pub fn hourly_average<I>(scores: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    scores
        .into_iter()
        .fold(None, |average, score| Some(average.map_or(score, |avg| (avg + score) / 2.0)))
}

/// Weight of an observation point.
#[inline]
pub fn distance_weight(distance_km: f64) -> f64 { (-0.1 * distance_km).exp() }

/// Running weighted total for one (region, time) cell.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct WeightedTotal {
    pub score: f64,
    pub weight: f64,
}

impl WeightedTotal {
    /// Add one point's average score.
    pub fn add(
        &mut self,
        average: f64,
        distance_km: f64,
    ) {
        let weight = distance_weight(distance_km);
        self.score += average * weight;
        self.weight += weight;
    }

    /// Final rounded score, `None` if nothing was added.
    pub fn weighted_score(&self) -> Option<Score> {
        if self.weight <= 0.0 {
            return None;
        }
        let score = (self.score / self.weight).round().clamp(f64::from(Score::MIN), f64::from(Score::MAX));
        Some(score as Score)
    }
}

// =============================================================================
// Weather Sources
// =============================================================================

/// Hourly forecast provider.
pub trait WeatherSource {
    /// Samples for each hour of a time period at one point.
    fn hourly(
        &mut self,
        point: &ObservationPoint,
        time: TimePeriod,
    ) -> Vec<WeatherSample>;
}

/// Hours sampled per time period (06-11 and 12-17).
pub const HOURS_PER_PERIOD: usize = 6;

/// Weather codes the generator draws from, clear weather most likely.
const SIMULATED_CODES: [u8; 12] = [0, 0, 0, 1, 1, 2, 2, 3, 45, 51, 61, 95];

/// Reference coast point (Suruga Bay) for the synthetic cloud bias.
const COAST_LAT: f64 = 35.0;
const COAST_LONG: f64 = 138.6;

/// Seeded synthetic forecasts. Each request advances the generator, so
/// successive refreshes produce different scores.
#[derive(Debug)]
pub struct SimulatedWeather {
    rng: Rng,
}

impl SimulatedWeather {
    pub fn with_seed(seed: u64) -> Self { Self { rng: Rng::with_seed(seed) } }

    fn sample(
        &mut self,
        point: &ObservationPoint,
        time: TimePeriod,
    ) -> WeatherSample {
        // Afternoons are hazier
        let humidity_base = match time {
            TimePeriod::Morning => 35.0,
            TimePeriod::Afternoon => 50.0,
        };
        // Points further inland see less low cloud
        let inland = ((COAST_LAT - point.lat).abs() + (COAST_LONG - point.long).abs()).min(1.0);
        let cloud_max = 100.0 - 40.0 * inland;
        let weather_code = SIMULATED_CODES[self.rng.usize(..SIMULATED_CODES.len())];
        let precipitation = if (51..=99).contains(&weather_code) { self.rng.f64() * 8.0 } else { 0.0 };

        WeatherSample {
            cloud_cover_low: (self.rng.f64() * cloud_max).round(),
            relative_humidity: humidity_base + (self.rng.f64() * 50.0).round(),
            weather_code,
            precipitation,
        }
    }
}

impl WeatherSource for SimulatedWeather {
    fn hourly(
        &mut self,
        point: &ObservationPoint,
        time: TimePeriod,
    ) -> Vec<WeatherSample> {
        (0..HOURS_PER_PERIOD).map(|_| self.sample(point, time)).collect()
    }
}

// =============================================================================
// Companion
// =============================================================================

/// Phone-side request handler.
pub struct Companion<W> {
    weather: W,
}

impl<W: WeatherSource> Companion<W> {
    pub const fn new(weather: W) -> Self { Self { weather } }

    /// Message announcing the companion is running.
    pub fn ready_message() -> Dictionary { InboundMessage::Ready.to_dictionary() }

    /// Weighted total for one cell across the region's observation points.
    pub fn score_cell(
        &mut self,
        region: Region,
        time: TimePeriod,
    ) -> WeightedTotal {
        let mut total = WeightedTotal::default();
        for point in observation_points(region) {
            let samples = self.weather.hourly(point, time);
            let average = hourly_average(samples.iter().map(|s| visibility_score(s, region)));
            if let Some(average) = average {
                total.add(average, point.distance_km);
            }
        }
        total
    }

    /// Handle a request from the watch, returning the reply if there is one.
    ///
    /// `update_all` is only answered when every cell scored above zero in
    /// total, so a batch of fully disqualified forecasts sends nothing.
    pub fn handle(
        &mut self,
        dict: &Dictionary,
    ) -> Option<Dictionary> {
        match OutboundRequest::parse(dict)? {
            OutboundRequest::UpdateAll => {
                let mut cells = [WeightedTotal::default(); 4];
                let keys = [
                    (Region::North, TimePeriod::Morning),
                    (Region::North, TimePeriod::Afternoon),
                    (Region::South, TimePeriod::Morning),
                    (Region::South, TimePeriod::Afternoon),
                ];
                for (cell, (region, time)) in cells.iter_mut().zip(keys) {
                    *cell = self.score_cell(region, time);
                }
                if cells.iter().any(|cell| cell.score <= 0.0) {
                    return None;
                }

                let scores = ScoreSet {
                    north_morning: cells[0].weighted_score()?,
                    north_afternoon: cells[1].weighted_score()?,
                    south_morning: cells[2].weighted_score()?,
                    south_afternoon: cells[3].weighted_score()?,
                };
                Some(InboundMessage::NewScores(scores).to_dictionary())
            }
            OutboundRequest::UpdateSingle { region, time } => {
                let score = self.score_cell(region, time).weighted_score()?;
                Some(InboundMessage::NewScore { region, time, score }.to_dictionary())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visibility_common::message::{MessageKey, send_request};

    use crate::bridge::Bridge;

    /// Same sample for every hour and point.
    struct FixedWeather(WeatherSample);

    impl WeatherSource for FixedWeather {
        fn hourly(
            &mut self,
            _point: &ObservationPoint,
            _time: TimePeriod,
        ) -> Vec<WeatherSample> {
            vec![self.0; HOURS_PER_PERIOD]
        }
    }

    fn sample(
        cloud_cover_low: f64,
        relative_humidity: f64,
        weather_code: u8,
        precipitation: f64,
    ) -> WeatherSample {
        WeatherSample { cloud_cover_low, relative_humidity, weather_code, precipitation }
    }

    fn request(request: OutboundRequest) -> Dictionary {
        let mut bridge = Bridge::new();
        assert!(send_request(&mut bridge, request).is_ok());
        bridge.next_for_companion().unwrap_or_default()
    }

    #[test]
    fn test_disqualifying_weather_scores_zero() {
        assert_eq!(visibility_score(&sample(0.0, 40.0, 45, 0.0), Region::North), 0.0, "fog");
        assert_eq!(visibility_score(&sample(0.0, 40.0, 48, 0.0), Region::North), 0.0, "rime fog");
        assert_eq!(visibility_score(&sample(0.0, 40.0, 95, 0.0), Region::North), 0.0, "thunderstorm");
        assert_eq!(visibility_score(&sample(0.0, 40.0, 0, 5.5), Region::North), 0.0, "heavy rain");
    }

    #[test]
    fn test_clear_sky_per_region() {
        assert_eq!(visibility_score(&WeatherSample::CLEAR, Region::North), 10.0);
        assert_eq!(visibility_score(&WeatherSample::CLEAR, Region::South), 8.0, "7.5 rounds up");
    }

    #[test]
    fn test_penalties() {
        assert_eq!(visibility_score(&sample(50.0, 85.0, 0, 0.0), Region::North), 2.0, "5 * 0.3 = 1.5");
        assert_eq!(visibility_score(&sample(0.0, 70.0, 0, 0.0), Region::North), 7.0, "10 * 0.7");
        assert_eq!(visibility_score(&sample(0.0, 40.0, 3, 0.0), Region::North), 4.0, "overcast");
        assert_eq!(visibility_score(&sample(0.0, 40.0, 61, 1.0), Region::North), 6.0, "light rain");
    }

    #[test]
    fn test_low_scores_clamped_to_one() {
        assert_eq!(visibility_score(&sample(100.0, 40.0, 0, 0.0), Region::North), 1.0);
    }

    #[test]
    fn test_hourly_average_is_pairwise() {
        assert_eq!(hourly_average([10.0, 4.0, 6.0]), Some(6.5), "((10 + 4) / 2 + 6) / 2");
        assert_eq!(hourly_average([3.0]), Some(3.0));
        assert_eq!(hourly_average(core::iter::empty::<f64>()), None);
    }

    #[test]
    fn test_distance_weight() {
        assert_eq!(distance_weight(0.0), 1.0);
        assert!((distance_weight(10.0) - (-1.0f64).exp()).abs() < 1e-12);
        assert!(distance_weight(12.47) < distance_weight(5.55), "farther points count less");
    }

    #[test]
    fn test_weighted_score() {
        let mut total = WeightedTotal::default();
        assert_eq!(total.weighted_score(), None);

        total.add(8.0, 0.0);
        total.add(4.0, 5.55);
        // (8 + 4w) / (1 + w) with w = exp(-0.555) ~ 0.574 -> 6.54
        assert_eq!(total.weighted_score(), Some(7));
    }

    #[test]
    fn test_update_all_replies_with_new_scores() {
        let mut companion = Companion::new(FixedWeather(WeatherSample::CLEAR));
        let reply = companion.handle(&request(OutboundRequest::UpdateAll));

        let expected = ScoreSet {
            north_morning: 10,
            north_afternoon: 10,
            south_morning: 8,
            south_afternoon: 8,
        };
        assert_eq!(reply.as_ref().and_then(InboundMessage::parse), Some(InboundMessage::NewScores(expected)));
    }

    #[test]
    fn test_update_all_withheld_when_any_cell_is_zero() {
        let mut companion = Companion::new(FixedWeather(sample(0.0, 40.0, 45, 0.0)));
        assert!(companion.handle(&request(OutboundRequest::UpdateAll)).is_none());
    }

    #[test]
    fn test_update_single_replies_with_new_score() {
        let mut companion = Companion::new(FixedWeather(sample(0.0, 40.0, 3, 0.0)));
        let reply = companion.handle(&request(OutboundRequest::UpdateSingle {
            region: Region::South,
            time: TimePeriod::Afternoon,
        }));

        // 10 * 0.4 * 0.75 = 3
        let expected = InboundMessage::NewScore {
            region: Region::South,
            time: TimePeriod::Afternoon,
            score: 3,
        };
        assert_eq!(reply.as_ref().and_then(InboundMessage::parse), Some(expected));
    }

    #[test]
    fn test_unknown_request_ignored() {
        let mut companion = Companion::new(FixedWeather(WeatherSample::CLEAR));
        let mut dict = Dictionary::new();
        dict.write_cstring(MessageKey::Type, "ready");
        assert!(companion.handle(&dict).is_none());
    }

    #[test]
    fn test_simulated_weather_is_deterministic() {
        let mut a = SimulatedWeather::with_seed(7);
        let mut b = SimulatedWeather::with_seed(7);
        let first = a.hourly(&NORTH_POINTS[0], TimePeriod::Morning);
        assert_eq!(first, b.hourly(&NORTH_POINTS[0], TimePeriod::Morning));
        assert_eq!(first.len(), HOURS_PER_PERIOD);

        for s in &first {
            assert!((0.0..=100.0).contains(&s.cloud_cover_low));
            assert!((35.0..=85.0).contains(&s.relative_humidity));
        }
    }

    #[test]
    fn test_simulated_scores_in_range() {
        let mut companion = Companion::new(SimulatedWeather::with_seed(42));
        for region in Region::ALL {
            for time in TimePeriod::ALL {
                if let Some(score) = companion.score_cell(region, time).weighted_score() {
                    assert!((0..=10).contains(&score), "{region:?} {time:?} scored {score}");
                }
            }
        }
    }

    #[test]
    fn test_ready_message() {
        let ready = Companion::<FixedWeather>::ready_message();
        assert_eq!(InboundMessage::parse(&ready), Some(InboundMessage::Ready));
    }
}
