//! MySQL repository implementations.

mod two_factor_repository_impl;

pub use two_factor_repository_impl::MySqlTwoFactorAuthRepository;
