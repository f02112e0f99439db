use crate::error::{OptimizerError, Result};
use crate::evolution::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Crowded-comparison tournament selection.
///
/// A tournament draws `tournament_size` contestants uniformly at random, with
/// replacement. The winner is the contestant with the lowest rank; among equal
/// ranks, the one with the larger crowding distance. Earlier contestants win
/// exact ties.
///
/// Tournament selection balances exploration and exploitation:
/// - Smaller tournament sizes lead to more exploration
/// - Larger tournament sizes lead to more exploitation
///
/// # Examples
///
/// ```
/// use rebalance::evolution::Individual;
/// use rebalance::rng::RandomNumberGenerator;
/// use rebalance::selection::TournamentSelection;
///
/// let mut population = vec![
///     Individual::new("front", vec![0.0, 1.0]),
///     Individual::new("dominated", vec![1.0, 2.0]),
/// ];
/// population[1].rank = 1;
///
/// let selection = TournamentSelection::new(2).unwrap();
/// let mut rng = RandomNumberGenerator::from_seed(3);
/// let winner = selection.select(&population, &mut rng).unwrap();
/// assert!(winner.rank <= 1);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new tournament selection.
    ///
    /// # Arguments
    ///
    /// * `tournament_size` - The number of contestants per tournament.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `tournament_size` is less than 2.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 2 {
            return Err(OptimizerError::Configuration(
                "Tournament size must be at least 2".to_string(),
            ));
        }
        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Runs one tournament and returns the winner.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if `population` is empty.
    pub fn select<'a, S>(
        &self,
        population: &'a [Individual<S>],
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a Individual<S>> {
        if population.is_empty() {
            return Err(OptimizerError::EmptyPopulation);
        }

        let mut best = &population[rng.gen_index(population.len())];
        for _ in 1..self.tournament_size {
            let contestant = &population[rng.gen_index(population.len())];
            if crowded_less(contestant, best) {
                best = contestant;
            }
        }
        Ok(best)
    }
}

impl Default for TournamentSelection {
    /// Binary tournament.
    fn default() -> Self {
        Self { tournament_size: 2 }
    }
}

/// The crowded-comparison operator: `true` if `a` is strictly preferred to `b`.
pub fn crowded_less<S>(a: &Individual<S>, b: &Individual<S>) -> bool {
    a.rank < b.rank || (a.rank == b.rank && a.crowding_distance > b.crowding_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn individual(rank: usize, distance: f64) -> Individual<usize> {
        let mut ind = Individual::new(rank, vec![rank as f64]);
        ind.rank = rank;
        ind.crowding_distance = distance;
        ind
    }

    #[test]
    fn test_tournament_size_validation() {
        assert!(TournamentSelection::new(0).is_err());
        assert!(TournamentSelection::new(1).is_err());
        assert_eq!(TournamentSelection::new(3).unwrap().tournament_size(), 3);
    }

    #[test]
    fn test_empty_population() {
        let selection = TournamentSelection::default();
        let mut rng = RandomNumberGenerator::from_seed(0);
        let population: Vec<Individual<usize>> = Vec::new();
        assert!(matches!(
            selection.select(&population, &mut rng),
            Err(OptimizerError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_crowded_comparison() {
        assert!(crowded_less(&individual(0, 0.0), &individual(1, f64::INFINITY)));
        assert!(crowded_less(&individual(1, 2.0), &individual(1, 1.0)));
        assert!(!crowded_less(&individual(1, 1.0), &individual(1, 1.0)));
    }

    #[test]
    fn test_large_tournament_prefers_best_rank() {
        let population: Vec<_> = (0..5).map(|r| individual(r, 0.0)).collect();
        let selection = TournamentSelection::new(50).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(12);

        let wins = (0..100)
            .filter(|_| selection.select(&population, &mut rng).map(|w| w.rank).ok() == Some(0))
            .count();
        assert!(wins > 95);
    }

    #[test]
    fn test_selection_pressure_favors_lower_ranks() {
        let population: Vec<_> = (0..10).map(|r| individual(r, 1.0)).collect();
        let selection = TournamentSelection::new(2).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(99);

        let mean_rank: f64 = (0..2000)
            .filter_map(|_| selection.select(&population, &mut rng).ok())
            .map(|w| w.rank as f64)
            .sum::<f64>()
            / 2000.0;
        // Uniform picking would average 4.5.
        assert!(mean_rank < 4.0);
    }
}
