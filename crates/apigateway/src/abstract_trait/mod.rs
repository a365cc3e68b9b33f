mod seed;

pub use self::seed::{DynSeedRepository, DynSeedService, SeedRepositoryTrait, SeedServiceTrait};
