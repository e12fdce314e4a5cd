//! # Shop Core
//!
//! 온라인 스토어 백엔드의 핵심 도메인 모델 및 공통 인프라를 제공합니다.
//!
//! - 사용자 및 역할 도메인 타입
//! - 사용자 저장소 추상화 (`UserStore`)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use logging::*;
