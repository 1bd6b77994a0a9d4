pub mod participant_ops;
