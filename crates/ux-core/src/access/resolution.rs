//! Access resolution state machine.
//!
//! 这个模块实现了访问解析的显式状态机：对每一次渲染,
//! 从认证/连接/资料快照纯函数地推导出唯一的终端状态。
//!
//! # Design Principles / 设计原则
//!
//! - **派生而非存储**: `ResolutionState` 永远不落盘, 每次都由输入重新推导
//! - **固定优先级**: 多个条件同时成立时, 先匹配者胜 — 顺序本身是契约
//! - **可测试**: 纯函数式推导 `resolve(input) -> state`, 没有 IO / 时间
//!
//! # Architecture / 架构
//!
//! ```text
//! AccessOrchestrator (ux-app)
//!   ├── 驱动 ActorInitGuard / ProfileResolver 得到快照
//!   ├── 调用 resolve() 得到 ResolutionState
//!   └── 按 RetryScope 执行重试 / 登出
//! ```

use serde::{Deserialize, Serialize};

use crate::access::query::QuerySnapshot;
use crate::access::status::ActorInitStatus;
use crate::access::university_email::is_valid_university_email;
use crate::error::{ClassifiedError, ErrorCategory};
use crate::identity::Identity;
use crate::profile::{OnboardingAnswers, UserProfile};

/// Everything the resolution depends on, captured at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionInput {
    /// Current session identity, if any
    pub identity: Option<Identity>,
    /// Actor init guard status
    pub actor_status: ActorInitStatus,
    /// Classified actor init failure, when status is error/timeout
    pub actor_error: Option<ClassifiedError>,
    /// Caller profile snapshot; `Fetched(None)` means "no profile yet"
    pub profile: QuerySnapshot<Option<UserProfile>>,
    /// Onboarding answers snapshot
    pub onboarding: QuerySnapshot<Option<OnboardingAnswers>>,
    /// Whether onboarding gates access at all (configuration flag)
    pub onboarding_required: bool,
}

/// Terminal resolution, exactly one per render.
///
/// 每次解析只产生一个终端状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionState {
    /// No session; public/anonymous view. No actor or profile fetch runs.
    ///
    /// 未登录, 公共视图。
    Unauthenticated,

    /// Actor init deadline elapsed. Retry resets the actor; Logout offered.
    ///
    /// 连接初始化超时。
    ActorTimeout,

    /// Actor init failed for any non-timeout reason.
    ///
    /// 连接初始化失败。
    ActorError { error: ClassifiedError },

    /// Connection or profile read still settling. No timeout UI yet; the
    /// fetch deadline will surface as its own state once it elapses.
    ///
    /// 资料加载中。
    ProfileLoading,

    /// Profile fetch failed with a timeout classification. Retry re-runs
    /// only the profile fetch, not the actor.
    ///
    /// 资料读取超时。
    ProfileTimeout { error: ClassifiedError },

    /// Profile fetch failed with any other classification.
    ///
    /// 资料读取失败。
    ProfileError { error: ClassifiedError },

    /// Profile exists but its email fails the university predicate.
    /// No retry can fix this; only Logout is offered.
    ///
    /// 邮箱域名不合法, 拒绝访问 (终态)。
    AccessDenied { email: String },

    /// Authenticated with no profile yet; show the creation form.
    ///
    /// 尚无资料, 进入建档流程。
    ProfileSetupRequired,

    /// Valid profile, onboarding answers absent or incomplete.
    ///
    /// 资料有效但入驻问卷未完成。
    OnboardingRequired { profile: UserProfile },

    /// Valid profile, onboarding complete (or not required); render the app.
    ///
    /// 准入, 渲染应用。
    Ready { profile: UserProfile },
}

/// Which retry a state supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryScope {
    /// Reset the actor handle and every dependent cached read
    Actor,
    /// Re-run only the profile fetch
    Profile,
}

impl ResolutionState {
    /// Retry scope offered by this state, if any. AccessDenied offers none:
    /// retrying cannot fix an invalid email.
    pub fn retry_scope(&self) -> Option<RetryScope> {
        match self {
            Self::ActorTimeout | Self::ActorError { .. } => Some(RetryScope::Actor),
            Self::ProfileTimeout { .. } | Self::ProfileError { .. } => Some(RetryScope::Profile),
            _ => None,
        }
    }

    /// Error-terminal states always offer a Logout escape hatch.
    pub fn offers_logout(&self) -> bool {
        matches!(
            self,
            Self::ActorTimeout
                | Self::ActorError { .. }
                | Self::ProfileTimeout { .. }
                | Self::ProfileError { .. }
                | Self::AccessDenied { .. }
        )
    }
}

/// Resolve the gate state. Pure; evaluated on every render.
///
/// The priority order is fixed and is itself a contract: multiple entry
/// conditions can hold at once, and the first match wins.
pub fn resolve(input: &ResolutionInput) -> ResolutionState {
    let state = resolve_state(input);
    #[cfg(feature = "tracing")]
    tracing::trace!(state = ?state, "gate resolved");
    state
}

fn resolve_state(input: &ResolutionInput) -> ResolutionState {
    // 1. No identity dominates everything else.
    if input.identity.is_none() {
        return ResolutionState::Unauthenticated;
    }

    // 2–3. Actor failures precede any profile consideration.
    match input.actor_status {
        ActorInitStatus::Timeout => return ResolutionState::ActorTimeout,
        ActorInitStatus::Error => {
            let error = input.actor_error.clone().unwrap_or(ClassifiedError {
                category: ErrorCategory::Unknown,
                message: "An unexpected error occurred. Please try again.".to_string(),
                detail: None,
            });
            return ResolutionState::ActorError { error };
        }
        ActorInitStatus::Initializing => return ResolutionState::ProfileLoading,
        ActorInitStatus::Ready => {}
    }

    // 4–6. Profile snapshot, failures split by classification.
    let profile = match &input.profile {
        QuerySnapshot::Unfetched | QuerySnapshot::Loading => {
            return ResolutionState::ProfileLoading
        }
        QuerySnapshot::Failed(error) if error.category == ErrorCategory::Timeout => {
            return ResolutionState::ProfileTimeout {
                error: error.clone(),
            }
        }
        QuerySnapshot::Failed(error) => {
            return ResolutionState::ProfileError {
                error: error.clone(),
            }
        }
        QuerySnapshot::Fetched(profile) => profile,
    };

    // 7. An existing profile with an invalid email is terminal, before
    //    onboarding is even considered. Granting access here would be a
    //    security regression.
    let profile = match profile {
        Some(profile) => {
            if !is_valid_university_email(&profile.email) {
                return ResolutionState::AccessDenied {
                    email: profile.email.clone(),
                };
            }
            profile
        }
        // 8. Fetched-but-absent triggers the creation flow, not an error.
        None => return ResolutionState::ProfileSetupRequired,
    };

    // 9. Onboarding gate, when configured.
    if input.onboarding_required {
        match &input.onboarding {
            QuerySnapshot::Unfetched | QuerySnapshot::Loading => {
                return ResolutionState::ProfileLoading
            }
            QuerySnapshot::Fetched(Some(answers)) if answers.is_complete() => {}
            // Absent, incomplete, or unreadable answers all land in the
            // form; submission will surface any persistent failure.
            _ => {
                return ResolutionState::OnboardingRequired {
                    profile: profile.clone(),
                }
            }
        }
    }

    // 10. Everything satisfied.
    ResolutionState::Ready {
        profile: profile.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PrincipalId;

    fn identity() -> Option<Identity> {
        Some(Identity::new(PrincipalId::from("principal-1")))
    }

    fn valid_profile() -> UserProfile {
        UserProfile {
            name: "A".to_string(),
            email: "a@jainuniversity.ac.in".to_string(),
            university: "Jain".to_string(),
        }
    }

    fn complete_answers() -> OnboardingAnswers {
        OnboardingAnswers {
            year: "3rd".to_string(),
            city: "Bengaluru".to_string(),
            address: "12 MG Road".to_string(),
        }
    }

    fn classified(category: ErrorCategory) -> ClassifiedError {
        ClassifiedError {
            category,
            message: "m".to_string(),
            detail: None,
        }
    }

    fn base_input() -> ResolutionInput {
        ResolutionInput {
            identity: identity(),
            actor_status: ActorInitStatus::Ready,
            actor_error: None,
            profile: QuerySnapshot::Fetched(Some(valid_profile())),
            onboarding: QuerySnapshot::Fetched(Some(complete_answers())),
            onboarding_required: true,
        }
    }

    #[test]
    fn test_no_identity_dominates_everything() {
        let input = ResolutionInput {
            identity: None,
            actor_status: ActorInitStatus::Timeout,
            actor_error: Some(classified(ErrorCategory::Timeout)),
            profile: QuerySnapshot::Failed(classified(ErrorCategory::Server)),
            onboarding: QuerySnapshot::Unfetched,
            onboarding_required: true,
        };
        assert_eq!(resolve(&input), ResolutionState::Unauthenticated);
    }

    #[test]
    fn test_actor_timeout_precedes_profile_state() {
        let input = ResolutionInput {
            actor_status: ActorInitStatus::Timeout,
            profile: QuerySnapshot::Fetched(Some(valid_profile())),
            ..base_input()
        };
        assert_eq!(resolve(&input), ResolutionState::ActorTimeout);
    }

    #[test]
    fn test_actor_error_carries_classification() {
        let input = ResolutionInput {
            actor_status: ActorInitStatus::Error,
            actor_error: Some(classified(ErrorCategory::StoppedService)),
            ..base_input()
        };
        match resolve(&input) {
            ResolutionState::ActorError { error } => {
                assert_eq!(error.category, ErrorCategory::StoppedService);
            }
            other => panic!("expected ActorError, got {other:?}"),
        }
    }

    #[test]
    fn test_actor_initializing_shows_loading() {
        let input = ResolutionInput {
            actor_status: ActorInitStatus::Initializing,
            ..base_input()
        };
        assert_eq!(resolve(&input), ResolutionState::ProfileLoading);
    }

    #[test]
    fn test_profile_loading_before_fetch_settles() {
        for snapshot in [QuerySnapshot::Unfetched, QuerySnapshot::Loading] {
            let input = ResolutionInput {
                profile: snapshot,
                ..base_input()
            };
            assert_eq!(resolve(&input), ResolutionState::ProfileLoading);
        }
    }

    #[test]
    fn test_profile_timeout_splits_from_other_failures() {
        let input = ResolutionInput {
            profile: QuerySnapshot::Failed(classified(ErrorCategory::Timeout)),
            ..base_input()
        };
        assert!(matches!(
            resolve(&input),
            ResolutionState::ProfileTimeout { .. }
        ));

        let input = ResolutionInput {
            profile: QuerySnapshot::Failed(classified(ErrorCategory::Server)),
            ..base_input()
        };
        assert!(matches!(
            resolve(&input),
            ResolutionState::ProfileError { .. }
        ));
    }

    #[test]
    fn test_access_denied_overrides_onboarding_and_ready() {
        // Complete onboarding must not rescue an invalid email.
        let input = ResolutionInput {
            profile: QuerySnapshot::Fetched(Some(UserProfile {
                email: "a@gmail.com".to_string(),
                ..valid_profile()
            })),
            ..base_input()
        };
        assert_eq!(
            resolve(&input),
            ResolutionState::AccessDenied {
                email: "a@gmail.com".to_string()
            }
        );
    }

    #[test]
    fn test_allowlisted_admin_email_is_not_denied() {
        let input = ResolutionInput {
            profile: QuerySnapshot::Fetched(Some(UserProfile {
                email: "pkamil13@gmail.com".to_string(),
                ..valid_profile()
            })),
            ..base_input()
        };
        assert!(matches!(resolve(&input), ResolutionState::Ready { .. }));
    }

    #[test]
    fn test_absent_profile_triggers_setup() {
        let input = ResolutionInput {
            profile: QuerySnapshot::Fetched(None),
            ..base_input()
        };
        assert_eq!(resolve(&input), ResolutionState::ProfileSetupRequired);
    }

    #[test]
    fn test_incomplete_onboarding_gates_ready() {
        for onboarding in [
            QuerySnapshot::Fetched(None),
            QuerySnapshot::Fetched(Some(OnboardingAnswers {
                address: "".to_string(),
                ..complete_answers()
            })),
        ] {
            let input = ResolutionInput {
                onboarding,
                ..base_input()
            };
            assert!(matches!(
                resolve(&input),
                ResolutionState::OnboardingRequired { .. }
            ));
        }
    }

    #[test]
    fn test_onboarding_not_required_skips_straight_to_ready() {
        let input = ResolutionInput {
            onboarding: QuerySnapshot::Unfetched,
            onboarding_required: false,
            ..base_input()
        };
        assert!(matches!(resolve(&input), ResolutionState::Ready { .. }));
    }

    #[test]
    fn test_ready_when_everything_satisfied() {
        match resolve(&base_input()) {
            ResolutionState::Ready { profile } => {
                assert_eq!(profile.email, "a@jainuniversity.ac.in");
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn test_exactly_one_state_for_every_actor_status() {
        // Totality over the status axis with an otherwise fixed input.
        for status in [
            ActorInitStatus::Initializing,
            ActorInitStatus::Ready,
            ActorInitStatus::Error,
            ActorInitStatus::Timeout,
        ] {
            let input = ResolutionInput {
                actor_status: status,
                ..base_input()
            };
            // resolve is total: it must return without panicking, and
            // repeated evaluation is stable.
            assert_eq!(resolve(&input), resolve(&input));
        }
    }

    #[test]
    fn test_retry_scope_per_state() {
        assert_eq!(
            ResolutionState::ActorTimeout.retry_scope(),
            Some(RetryScope::Actor)
        );
        assert_eq!(
            ResolutionState::ActorError {
                error: classified(ErrorCategory::Server)
            }
            .retry_scope(),
            Some(RetryScope::Actor)
        );
        assert_eq!(
            ResolutionState::ProfileTimeout {
                error: classified(ErrorCategory::Timeout)
            }
            .retry_scope(),
            Some(RetryScope::Profile)
        );
        assert_eq!(
            ResolutionState::AccessDenied {
                email: "a@gmail.com".to_string()
            }
            .retry_scope(),
            None
        );
        assert_eq!(ResolutionState::Unauthenticated.retry_scope(), None);
    }

    #[test]
    fn test_logout_offered_from_every_error_terminal_state() {
        assert!(ResolutionState::ActorTimeout.offers_logout());
        assert!(ResolutionState::AccessDenied {
            email: "e".to_string()
        }
        .offers_logout());
        assert!(!ResolutionState::Ready {
            profile: valid_profile()
        }
        .offers_logout());
        assert!(!ResolutionState::Unauthenticated.offers_logout());
    }
}
