mod seed;

pub use self::seed::SeedService;
