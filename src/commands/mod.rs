pub mod cat;
pub mod cd;
pub mod cp;
pub mod exit;
pub mod ls;
pub mod mv;
pub mod rm;
