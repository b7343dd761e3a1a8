// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod blocking_queue;
pub use blocking_queue::BlockingQueue;

pub mod partitioner;
pub use partitioner::{chunk, partition};

mod worker_message;
pub use worker_message::{Command, Partial};

mod mapper;
pub use mapper::{Mapper, MapperFactory};

mod shared_input;
pub use shared_input::SharedInput;

mod engine_error;
pub use engine_error::EngineError;

mod engine_config;
pub use engine_config::{CorePinning, EngineConfig, QueueTopology};

mod worker;

mod engine;
pub use engine::MapReduceEngine;
