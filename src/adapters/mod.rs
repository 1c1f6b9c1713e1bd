pub mod api_handler;
pub mod health_handler;
pub mod request_handler;

#[cfg(test)]
mod request_handler_test;
