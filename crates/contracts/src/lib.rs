//! Типы обмена между backend просмотра логов и его клиентами.

pub mod domain;
pub mod shared;
