
mod auth;
mod chat;
mod documents;
mod notifications;
mod profile;
