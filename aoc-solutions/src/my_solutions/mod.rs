pub mod year_2020;
pub mod year_2025;
