pub mod quadro;
