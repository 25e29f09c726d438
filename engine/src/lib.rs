pub mod config;

pub mod ranking {
    pub mod calculator;
    pub mod registry;
    pub mod usecase;

    pub use calculator::{GenericCalculator, ScoreCalculator, WarzoneCalculator};
    pub use registry::CalculatorRegistry;
    pub use usecase::RankingUsecase;
}

pub mod games {
    pub mod repository;

    pub use repository::GameRepository;
}

pub mod stats {
    pub mod repository;
    pub mod usecase;

    pub use repository::PlayerStatsRepository;
    pub use usecase::StatsAggregationUsecase;
}

pub mod matches {
    pub mod repository;
    pub mod usecase;

    pub use repository::MatchRepository;
    pub use usecase::MatchUsecase;
}

pub mod leaderboard {
    pub mod usecase;

    pub use usecase::LeaderboardUsecase;
}

pub mod reconcile {
    pub mod scheduler;

    pub use scheduler::StatsReconciler;
}

// Unit test modules only
#[cfg(test)]
mod test_support;
