pub mod braess;
pub mod pigou;
pub mod random;
pub mod scenario;
