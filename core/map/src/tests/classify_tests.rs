use super::stubs::{strings, StubChatProvider};
use crate::usecase::DecisionClassifier;
use common::adapter::NoopLog;
use common::domain::{Category, Decision, OutputType, SubjectFields};
use common::error::Error;
use common::ports::outbound::ChatProvider;
use std::sync::Arc;

fn classifier(provider: Arc<StubChatProvider>, fallback: Decision) -> DecisionClassifier {
    let provider: Arc<dyn ChatProvider> = provider;
    DecisionClassifier::new(Some(provider), "gpt-4o-mini", 0.2, fallback, Arc::new(NoopLog))
}

fn back_pain() -> SubjectFields {
    SubjectFields::validate(
        Category::SessionSafety,
        strings(&["50대 남성, 허리디스크", "오늘 허리 뻐근함", "데드리프트"]),
    )
    .unwrap()
}

#[test]
fn test_stop_tag_yields_stop() {
    let provider = Arc::new(StubChatProvider::replying("[STOP] 허리 부담이 큰 동작입니다"));
    let c = classifier(Arc::clone(&provider), Decision::Modification)
        .classify(&back_pain())
        .unwrap();
    assert_eq!(c.decision, Decision::Stop);
    assert!(c.matched);
    assert_eq!(c.report, "[STOP] 허리 부담이 큰 동작입니다");
    assert_eq!(provider.calls(), 1);
}

#[test]
fn test_priority_not_first_occurrence() {
    // MODIFICATION が先に出ても STOP が含まれていれば STOP
    let provider = Arc::new(StubChatProvider::replying(
        "판정 후보: MODIFICATION ... 최종: STOP",
    ));
    let c = classifier(provider, Decision::Go).classify(&back_pain()).unwrap();
    assert_eq!(c.decision, Decision::Stop);

    let provider = Arc::new(StubChatProvider::replying("GO 가능하나 MODIFICATION 권장"));
    let c = classifier(provider, Decision::Go).classify(&back_pain()).unwrap();
    assert_eq!(c.decision, Decision::Modification);
}

#[test]
fn test_no_keyword_uses_fallback_deterministically() {
    for _ in 0..3 {
        let provider = Arc::new(StubChatProvider::replying("판단 보류: 추가 정보 필요"));
        let c = classifier(provider, Decision::Modification)
            .classify(&back_pain())
            .unwrap();
        assert_eq!(c.decision, Decision::Modification);
        assert!(!c.matched);
    }

    let provider = Arc::new(StubChatProvider::replying("판단 보류"));
    let c = classifier(provider, Decision::Go).classify(&back_pain()).unwrap();
    assert_eq!(c.decision, Decision::Go);
}

#[test]
fn test_empty_reply_is_fallback_not_error() {
    let provider = Arc::new(StubChatProvider::replying(""));
    let c = classifier(provider, Decision::Modification)
        .classify(&back_pain())
        .unwrap();
    assert_eq!(c.decision, Decision::Modification);
    assert!(!c.matched);
    assert_eq!(c.output_type, OutputType::Unknown);
}

#[test]
fn test_red_flag_detected_with_fallback_decision() {
    let provider = Arc::new(StubChatProvider::replying(
        "🚨 [RED FLAG]\n현재 입력된 정보에는 즉각적인 확인이 필요한 신호가 포함되어 있습니다.",
    ));
    let c = classifier(provider, Decision::Modification)
        .classify(&back_pain())
        .unwrap();
    assert_eq!(c.output_type, OutputType::RedFlag);
    assert_eq!(c.decision, Decision::Modification);
    assert!(!c.matched);
}

#[test]
fn test_provider_failure_is_classification_unavailable() {
    let provider = Arc::new(StubChatProvider::failing(Error::timeout("Request timed out")));
    let err = classifier(provider, Decision::Modification)
        .classify(&back_pain())
        .unwrap_err();
    assert!(matches!(err, Error::ClassificationUnavailable(ref m) if m.contains("timed out")));
    assert_eq!(err.exit_code(), 74);
}

#[test]
fn test_missing_key_is_configuration_missing() {
    let c = DecisionClassifier::new(None, "gpt-4o-mini", 0.2, Decision::Modification, Arc::new(NoopLog));
    let err = c.classify(&back_pain()).unwrap_err();
    assert!(matches!(err, Error::ConfigurationMissing(ref m) if m.contains("OPENAI_API_KEY")));
    assert_eq!(err.exit_code(), 78);
}

#[test]
fn test_request_carries_governance_prompt_and_fields() {
    let provider = Arc::new(StubChatProvider::replying("[GO]"));
    classifier(Arc::clone(&provider), Decision::Modification)
        .classify(&back_pain())
        .unwrap();
    let requests = provider.requests.lock().unwrap();
    let req = &requests[0];
    assert_eq!(req.model, "gpt-4o-mini");
    assert_eq!(req.temperature, 0.2);
    assert_eq!(req.messages[0].role, "system");
    assert_eq!(req.messages[0].content, Category::SessionSafety.system_prompt());
    assert_eq!(
        req.messages[1].content,
        "1. 회원 정보: 50대 남성, 허리디스크\n2. 현재 증상: 오늘 허리 뻐근함\n3. 예정 운동: 데드리프트"
    );
}

#[test]
fn test_facility_uses_its_own_prompt() {
    let provider = Arc::new(StubChatProvider::replying("[MODIFICATION] 케이블 교체 전 사용 제한"));
    let fields = SubjectFields::validate(
        Category::FacilityCheck,
        strings(&["킹스짐 2호점", "김코치", "스미스머신 케이블 마모"]),
    )
    .unwrap();
    let c = classifier(Arc::clone(&provider), Decision::Modification)
        .classify(&fields)
        .unwrap();
    assert_eq!(c.decision, Decision::Modification);
    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests[0].messages[0].content, Category::FacilityCheck.system_prompt());
}
