pub mod bracket;
pub mod byes;
pub mod input_validation;
pub mod progression;
pub mod schedule;
pub mod seeding;
pub mod standings;
pub mod tournament;
pub mod validation;

pub use bracket::BracketBuilder;
pub use byes::ByeAssigner;
pub use input_validation::TournamentInputValidator;
pub use schedule::ScheduleService;
pub use seeding::SeedingGenerator;
pub use standings::StandingsCalculator;
pub use tournament::TournamentService;
pub use validation::BracketValidator;
