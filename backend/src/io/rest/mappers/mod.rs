pub mod account_mapper;
pub mod anniversary_mapper;
pub mod gratitude_mapper;

pub use account_mapper::AccountMapper;
pub use anniversary_mapper::AnniversaryMapper;
pub use gratitude_mapper::GratitudeMapper;
