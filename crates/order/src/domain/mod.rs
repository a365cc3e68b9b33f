pub mod requester;
pub mod requests;
pub mod response;
