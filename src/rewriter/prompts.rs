// Instruction templates sent as the system message of each rewrite call.
// Every template asks for the result only, so responses can be spliced
// back into the text without post-processing.

pub const MERGE_TWO: &str = "당신은 한국어 문장 병합 전문가입니다.
두 개의 문장을 자연스럽게 하나의 문장으로 합쳐주세요.
- 의미는 보존하되, 문장 구조는 자연스럽게 변경
- 접속사나 연결어미를 적절히 사용
- 결과만 출력 (설명 없이)";

pub const SPLIT_ONE: &str = "당신은 한국어 문장 분리 전문가입니다.
긴 문장을 자연스러운 2-3개의 짧은 문장으로 분리해주세요.
- 의미는 보존
- 각 문장이 독립적으로 의미가 통하도록
- JSON 배열 형식으로 출력: [\"문장1\", \"문장2\", ...]";

pub const REORDER: &str = "당신은 한국어 문단 재구성 전문가입니다.
주어진 문장들의 순서를 자연스럽게 재배열해주세요.
- 논리적 흐름 유지
- 전체 의미 보존
- JSON 배열 형식으로 출력: [\"문장1\", \"문장2\", ...]";

pub const FILLER_EXPRESSIONS: &str = "당신은 한국어 글쓰기 전문가입니다.
주어진 텍스트에 자연스러운 담화 표지(filler)를 추가해주세요.
- 예: \"사실\", \"물론\", \"아무래도\", \"어쨌든\", \"솔직히\" 등
- 과하지 않게, 2-3개 정도만 자연스러운 위치에 추가
- 의미 변경 없이 자연스러움만 추가
- 결과만 출력";

pub const CONNECTOR_VARIATION: &str = "당신은 한국어 문장 연결 전문가입니다.
텍스트 내의 접속사와 연결어를 다양하게 바꿔주세요.
- \"그러나\" → \"하지만\", \"그렇지만\", \"근데\" 등
- \"그리고\" → \"또한\", \"게다가\", \"더불어\" 등
- \"따라서\" → \"그래서\", \"결국\", \"그러므로\" 등
- 문맥에 맞게 자연스럽게 변경
- 결과만 출력";

pub fn paraphrase(style_description: &str) -> String {
    format!(
        "당신은 한국어 패러프레이징 전문가입니다.
주어진 텍스트를 {style_description} 다시 작성해주세요.
- 핵심 의미는 반드시 보존
- 문장 구조와 어휘는 다양하게 변경
- 원문과 최대한 다른 표현 사용
- 결과만 출력 (설명 없이)"
    )
}

// structural stage

pub const STRUCTURAL_PARAPHRASE: &str = "다음 문장의 구조를 바꿔서 다시 작성해주세요.
가능한 변환:
- 능동태 ↔ 수동태
- 주어/목적어 순서 변경
- 문장 성분 재배치
의미는 동일하게 유지하되, 구조만 변경해주세요.
결과만 출력하세요.";

pub const CLAUSE_SPLIT: &str = "다음 텍스트를 절(clause) 단위로 분리해서
각각 독립적인 짧은 문장으로 만들어주세요.
- 원래 의미 보존
- 자연스러운 한국어 문장으로
- 결과만 출력";

// vocabulary stage

pub fn synonym_diversification(level: &str, share: &str) -> String {
    format!(
        "다음 텍스트의 어휘를 {level} 수준으로 다양화해주세요.
규칙:
1. 핵심 의미는 반드시 보존
2. 단어의 약 {share}를 동의어/유사어로 교체
3. 전문 용어는 유지하되, 일반 어휘는 다양하게
4. 자연스러운 문장 유지
5. 결과만 출력 (설명 없이)"
    )
}

pub const FORMALITY_MIX: &str = "다음 텍스트의 문체를 자연스럽게 섞어주세요.
- 기본적으로 격식체를 유지하되
- 일부 문장에서 \"~요\", \"~거든요\" 같은 구어체 사용
- 딱딱하지 않고 자연스러운 느낌으로
- 의미 변경 없이 문체만 조금씩 변화
결과만 출력하세요.";

pub const DIVERSIFY_EXPRESSIONS: &str = "다음 텍스트에서 반복되는 표현을 찾아 다양화해주세요.
- 같은 단어/표현이 반복되면 다른 표현으로
- 문장 시작 패턴이 비슷하면 변경
- 자연스러운 글의 흐름 유지
결과만 출력하세요.";

pub fn style_transfer(style_description: &str) -> String {
    format!(
        "다음 텍스트를 {style_description} 다시 작성해주세요.
- 핵심 내용과 의미는 보존
- 문체와 어조만 변경
결과만 출력하세요."
    )
}

pub const HEDGING: &str = "다음 텍스트에 완화 표현(hedging)을 적절히 추가해주세요.
예시:
- \"~이다\" → \"~인 것 같다\", \"~일 수 있다\"
- \"확실히\" → \"아마도\", \"어느 정도\"
- 단정적 표현을 부드럽게
- 과하지 않게, 자연스럽게
결과만 출력하세요.";

// noise stage

pub const SHORTEN: &str = "다음 문장을 더 간결하게 줄여주세요.
- 핵심 의미 보존
- 불필요한 수식어 제거
- 자연스러운 문장 유지
결과만 출력하세요.";

pub const LENGTHEN: &str = "다음 문장에 적절한 수식어나 부연 설명을 추가해주세요.
- 자연스럽게 문장을 늘리기
- 과하지 않게, 3-5단어 정도만 추가
- 의미는 유지
결과만 출력하세요.";

/// `hints` are `word → rare alternatives` lines for words found in the text
pub fn unpredictability(hints: &[String]) -> String {
    let mut instruction = String::from(
        "다음 텍스트를 더 예측하기 어렵게 만들어주세요.
방법:
1. 흔한 표현 대신 덜 일반적인 동의어 사용
2. 문장 구조를 다양하게
3. 예상치 못한 비유나 표현 1-2개 추가
4. 전체적인 의미는 유지
결과만 출력하세요.",
    );
    if !hints.is_empty() {
        instruction.push_str("\n참고할 수 있는 덜 흔한 표현:");
        for hint in hints {
            instruction.push_str("\n- ");
            instruction.push_str(hint);
        }
    }
    instruction
}

pub const RHETORICAL: &str = "다음 텍스트에 수사적 질문이나 자문자답을 1-2개 추가해주세요.
예시:
- \"왜 그럴까? 이유는 간단하다.\"
- \"과연 그럴까? 꼭 그렇다고만은 할 수 없다.\"
- \"여기서 의문이 생긴다.\"
자연스럽게 녹여서 추가하세요.
결과만 출력하세요.";

pub const PERSONAL_VOICE: &str = "다음 텍스트에 약간의 주관적/개인적 터치를 추가해주세요.
- \"개인적으로는\", \"내 생각에는\" 같은 표현 1-2개
- 완전한 객관성보다는 저자의 목소리가 느껴지게
- 과하지 않게, 자연스럽게
결과만 출력하세요.";

pub fn burstiness(target_level: f64) -> String {
    format!(
        "다음 텍스트의 단어 사용 패턴을 조정해주세요.
목표: 일부 핵심 단어는 반복하고, 다른 부분은 다양한 어휘 사용 (목표 버스트니스 {target_level:.2}, 범위 -1~1)
- 중요한 개념은 의도적으로 2-3번 반복
- 나머지 부분은 동의어를 활용해 다양하게
- 전체적으로 불균일한 단어 분포 만들기
결과만 출력하세요."
    )
}
