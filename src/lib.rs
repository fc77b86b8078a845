// src/lib.rs
//
// Calculatrice PCS : bibliothèque (noyau sans interface)
// Le binaire (src/main.rs) ajoute la fenêtre eframe par-dessus.

pub mod noyau;
