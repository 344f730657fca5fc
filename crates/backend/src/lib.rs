//! Backend просмотра логов: разбирает загруженные текстовые лог-файлы в записи,
//! хранит их в SQLite и отдает списки по фильтрам и статистику.

pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;
