pub mod edge_event;
