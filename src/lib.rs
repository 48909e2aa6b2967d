//! Backend de inventario de equipos TI
//!
//! Catálogo de stock con tres contadores (total / disponible / asignado),
//! instancias de equipos en seis categorías cuyas transiciones de estado
//! mueven los contadores dentro de una transacción, envíos de consumibles
//! multi-línea y estadísticas de solo lectura.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
