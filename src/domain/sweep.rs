//! Trial generation for the date/duration sweep.
//!
//! A sweep is `origins × iterations` trials. Each trial draws a trip length
//! from the duration bounds and a departure offset from the search window,
//! both inclusive, and derives the return date from them. How values are
//! drawn is delegated to a [`TrialSampler`]:
//!
//! - [`UniformSampler`] - independent uniform draws, optionally seeded
//! - [`SteppedSampler`] - evenly spaced, fully deterministic
//!
//! Sequences are lazy and borrow the sampler, so a new one is started for
//! every destination.

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::DomainError;
use super::iata::IataCode;

/// Inclusive range of whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    min: u32,
    max: u32,
}

impl DayRange {
    pub fn new(min: u32, max: u32) -> Result<Self, DomainError> {
        if min > max {
            return Err(DomainError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    #[must_use]
    pub const fn span(&self) -> u32 {
        self.max - self.min
    }

    #[must_use]
    pub const fn contains(&self, days: u32) -> bool {
        days >= self.min && days <= self.max
    }
}

/// Process-wide sweep settings, read-only during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub origins: Vec<IataCode>,
    pub trip_days: DayRange,
    pub window_days: DayRange,
    /// Trials per origin airport.
    pub iterations: u32,
    /// Stop an origin early once a fare lands inside the typical price range.
    pub stop_at_typical_price: bool,
}

/// One fare-lookup attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    pub origin: IataCode,
    /// Position of this trial within its origin, starting at zero.
    pub index: u32,
    pub departure_offset: u32,
    pub trip_days: u32,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
}

/// Source of day values for trials.
///
/// Implementations must return a value inside `range`.
pub trait TrialSampler: Send {
    /// Pick a value for trial `index` from `range`.
    fn pick(&mut self, index: u32, range: DayRange) -> u32;
}

/// Independent uniform draws.
pub struct UniformSampler {
    rng: StdRng,
}

impl UniformSampler {
    /// Seeded samplers repeat the same sequence; unseeded ones use OS entropy.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl TrialSampler for UniformSampler {
    fn pick(&mut self, _index: u32, range: DayRange) -> u32 {
        self.rng.gen_range(range.min()..=range.max())
    }
}

/// Evenly spaced values from `min` to `max` over `steps` trials.
pub struct SteppedSampler {
    steps: u32,
}

impl SteppedSampler {
    #[must_use]
    pub fn new(steps: u32) -> Self {
        Self { steps }
    }
}

impl TrialSampler for SteppedSampler {
    fn pick(&mut self, index: u32, range: DayRange) -> u32 {
        if self.steps <= 1 || range.span() == 0 {
            return range.min();
        }
        let position = u64::from(index % self.steps);
        let offset = u64::from(range.span()) * position / u64::from(self.steps - 1);
        // offset <= span, so this cannot leave the range.
        range.min() + u32::try_from(offset).unwrap_or(range.span())
    }
}

/// Trial generator anchored on a start date.
pub struct SweepPlan<'a> {
    params: &'a SearchParams,
    today: NaiveDate,
}

impl<'a> SweepPlan<'a> {
    #[must_use]
    pub fn new(params: &'a SearchParams, today: NaiveDate) -> Self {
        Self { params, today }
    }

    /// Upper bound on lookups for one destination.
    #[must_use]
    pub fn max_trials(&self) -> usize {
        self.params.origins.len() * self.params.iterations as usize
    }

    /// Trials for a single origin.
    pub fn trials_for<'s>(
        &'s self,
        origin: &'s IataCode,
        sampler: &'s mut dyn TrialSampler,
    ) -> impl Iterator<Item = Trial> + 's {
        (0..self.params.iterations).map(move |index| self.draw(origin, index, sampler))
    }

    /// Trials for every origin, origin by origin.
    pub fn trials<'s>(
        &'s self,
        sampler: &'s mut dyn TrialSampler,
    ) -> impl Iterator<Item = Trial> + 's {
        let per_origin = self.params.iterations;
        let total = self.params.origins.len() as u64 * u64::from(per_origin);
        (0..total).map(move |n| {
            let origin = &self.params.origins[(n / u64::from(per_origin)) as usize];
            let index = (n % u64::from(per_origin)) as u32;
            self.draw(origin, index, sampler)
        })
    }

    fn draw(&self, origin: &IataCode, index: u32, sampler: &mut dyn TrialSampler) -> Trial {
        let trip_days = sampler.pick(index, self.params.trip_days);
        let departure_offset = sampler.pick(index, self.params.window_days);
        // Saturates at the last representable date instead of panicking.
        let departure_date = self
            .today
            .checked_add_days(Days::new(u64::from(departure_offset)))
            .unwrap_or(NaiveDate::MAX);
        let return_date = departure_date
            .checked_add_days(Days::new(u64::from(trip_days)))
            .unwrap_or(NaiveDate::MAX);

        Trial {
            origin: origin.clone(),
            index,
            departure_offset,
            trip_days,
            departure_date,
            return_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(origins: &[&str], iterations: u32) -> SearchParams {
        SearchParams {
            origins: origins.iter().map(|o| IataCode::parse(o).unwrap()).collect(),
            trip_days: DayRange::new(7, 10).unwrap(),
            window_days: DayRange::new(150, 180).unwrap(),
            iterations,
            stop_at_typical_price: false,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn assert_within_bounds(params: &SearchParams, trials: &[Trial]) {
        for trial in trials {
            assert!(params.window_days.contains(trial.departure_offset), "{trial:?}");
            assert!(params.trip_days.contains(trial.trip_days), "{trial:?}");
            assert_eq!(
                trial.departure_date,
                today() + Days::new(u64::from(trial.departure_offset))
            );
            assert_eq!(
                (trial.return_date - trial.departure_date).num_days(),
                i64::from(trial.trip_days)
            );
        }
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            DayRange::new(10, 7),
            Err(DomainError::InvertedRange { min: 10, max: 7 })
        );
        assert!(DayRange::new(7, 7).is_ok());
    }

    #[test]
    fn uniform_trials_stay_within_bounds() {
        let params = params(&["ASU", "EZE", "GRU"], 50);
        let plan = SweepPlan::new(&params, today());

        for seed in 0..20 {
            let mut sampler = UniformSampler::new(Some(seed));
            let trials: Vec<_> = plan.trials(&mut sampler).collect();
            assert_eq!(trials.len(), plan.max_trials());
            assert_within_bounds(&params, &trials);
        }
    }

    #[test]
    fn stepped_trials_cover_both_ends() {
        let params = params(&["ASU"], 4);
        let plan = SweepPlan::new(&params, today());
        let mut sampler = SteppedSampler::new(params.iterations);
        let origin = params.origins[0].clone();

        let trials: Vec<_> = plan.trials_for(&origin, &mut sampler).collect();
        assert_within_bounds(&params, &trials);

        let offsets: Vec<_> = trials.iter().map(|t| t.departure_offset).collect();
        let durations: Vec<_> = trials.iter().map(|t| t.trip_days).collect();
        assert_eq!(offsets, vec![150, 160, 170, 180]);
        assert_eq!(durations, vec![7, 8, 9, 10]);
    }

    #[test]
    fn single_step_and_degenerate_ranges_use_minimum() {
        let mut sampler = SteppedSampler::new(1);
        assert_eq!(sampler.pick(0, DayRange::new(3, 9).unwrap()), 3);

        let mut sampler = SteppedSampler::new(5);
        assert_eq!(sampler.pick(4, DayRange::new(9, 9).unwrap()), 9);
    }

    #[test]
    fn trials_are_grouped_by_origin_and_restartable() {
        let params = params(&["ASU", "EZE"], 3);
        let plan = SweepPlan::new(&params, today());

        let mut first = UniformSampler::new(Some(7));
        let a: Vec<_> = plan.trials(&mut first).collect();
        let mut second = UniformSampler::new(Some(7));
        let b: Vec<_> = plan.trials(&mut second).collect();
        assert_eq!(a, b);

        let origins: Vec<_> = a.iter().map(|t| t.origin.as_str()).collect();
        assert_eq!(origins, vec!["ASU", "ASU", "ASU", "EZE", "EZE", "EZE"]);
        let indexes: Vec<_> = a.iter().map(|t| t.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn dates_past_the_calendar_limit_saturate() {
        let params = SearchParams {
            window_days: DayRange::new(u32::MAX, u32::MAX).unwrap(),
            ..params(&["ASU"], 2)
        };
        let plan = SweepPlan::new(&params, today());
        let mut sampler = SteppedSampler::new(2);

        let trials: Vec<_> = plan.trials(&mut sampler).collect();

        assert_eq!(trials.len(), 2);
        assert!(trials.iter().all(|t| t.return_date == NaiveDate::MAX));
    }

    #[test]
    fn zero_iterations_yield_nothing() {
        let params = params(&["ASU"], 0);
        let plan = SweepPlan::new(&params, today());
        let mut sampler = SteppedSampler::new(0);
        assert_eq!(plan.trials(&mut sampler).count(), 0);
    }
}
