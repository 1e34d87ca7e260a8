pub mod team_assignment;
