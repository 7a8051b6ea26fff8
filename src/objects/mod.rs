mod planet;

pub use planet::Planet;
