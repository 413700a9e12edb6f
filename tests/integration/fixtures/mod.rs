// Korean sample texts shared by the integration tests
#![allow(dead_code)]

/// Two short sentences, one per terminal mark
pub const TWO_SENTENCES: &str = "이것은 문장입니다. 이것도 문장이에요!";

/// Evenly sized expository sentences, the shape that reads as generated text
pub const UNIFORM_PARAGRAPH: &str = "인공지능 기술은 빠르게 발전하고 있습니다. \
    많은 기업들이 새로운 서비스를 출시하고 있습니다. \
    정부는 관련 규제를 마련하려고 노력하고 있습니다. \
    전문가들은 윤리적 문제에 대해 우려하고 있습니다. \
    시민들은 변화에 적응하기 위해 공부하고 있습니다.";

/// Mixed sentence lengths with connectors the vocabulary stage knows
pub const VARIED_PARAGRAPH: &str = "비가 왔다. \
    그러나 우리는 예정대로 산에 오르기로 했고, 준비물을 꼼꼼히 챙긴 뒤 새벽 다섯 시에 집을 나섰으며, \
    버스 안에서 오늘 걸을 코스를 다시 한 번 확인하면서 서로의 컨디션을 물어보았다. \
    정상은 멀었다. \
    그리고 내려오는 길에 작은 찻집에 들러 따뜻한 차를 마셨다. \
    따라서 그날의 기억은 생각보다 훨씬 좋게 남아 있다.";

/// Quotes and sentence-final endings without trailing punctuation
pub const DIALOG_TEXT: &str = "\"정말 갈 거야?\" 그녀가 물었다. 나는 고개를 끄덕였다. \
    \"그럼 조심해!\" 그녀의 목소리가 떨렸다.";
