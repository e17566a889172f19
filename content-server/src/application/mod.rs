pub(crate) mod access_control;
pub(crate) mod auth_service;
pub(crate) mod post_service;
pub(crate) mod role_service;
pub(crate) mod session;
pub(crate) mod token_codec;
pub(crate) mod user_service;

#[cfg(test)]
pub(crate) mod support;
