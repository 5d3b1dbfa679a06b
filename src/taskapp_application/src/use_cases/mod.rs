pub mod login_user;
pub mod register_user;

#[cfg(test)]
mod test_support;
