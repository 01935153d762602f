use std::ops::Range;

use crate::error::ScreeningError;

/// Fixed, ordered questionnaire. Immutable at run time; defined by the
/// questionnaire owner.
#[derive(Debug, Clone)]
pub struct QuestionSet {
    questions: Vec<String>,
}

impl QuestionSet {
    /// Wraps an ordered list of canonical question strings.
    #[must_use]
    pub fn new(questions: Vec<String>) -> Self {
        Self { questions }
    }

    /// The six-question production form (DSM-style depression screen on
    /// questions 1-3, generalized anxiety screen on questions 4-6).
    #[must_use]
    pub fn deployed() -> Self {
        Self::new(
            DEPLOYED_QUESTIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        )
    }

    /// Number of questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// True for an empty form.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions in canonical order.
    #[must_use]
    pub fn questions(&self) -> &[String] {
        &self.questions
    }
}

/// Question index windows feeding each condition classifier.
///
/// The deployed windows overlap at index 2: question 3 probes the shared
/// substance/medical-cause symptom and was used to train both models.
#[derive(Debug, Clone)]
pub struct ConditionWindows {
    /// Indices feeding the depression classifier.
    pub depression: Range<usize>,
    /// Indices feeding the anxiety classifier.
    pub anxiety: Range<usize>,
}

impl ConditionWindows {
    /// Windows the production classifiers were trained on.
    #[must_use]
    pub const fn deployed() -> Self {
        Self {
            depression: 0..3,
            anxiety: 2..6,
        }
    }

    /// Checks both windows against the question count.
    pub fn validate(&self, question_count: usize) -> Result<(), ScreeningError> {
        for (name, window) in [("depression", &self.depression), ("anxiety", &self.anxiety)] {
            if window.is_empty() || window.end > question_count {
                return Err(ScreeningError::InputValidation(format!(
                    "{name} window {}..{} does not fit a {question_count}-question form",
                    window.start, window.end
                )));
            }
        }
        Ok(())
    }
}

const DEPLOYED_QUESTIONS: [&str; 6] = [
    "هل مررت بفترة استمرت أسبوعين أو أكثر كنت تعاني خلالها من خمسة أعراض أو أكثر مما يلي، مع ضرورة وجود عرض المزاج المكتئب أو فقدان الشغف والاهتمام بالأنشطة التي كنت تستمتع بها سابقًا؟ الأعراض تشمل: الشعور بمزاج مكتئب معظم ساعات اليوم يوميًا على مدى أسبوعين أو أكثر، الإحساس المستمر بالتعب والإرهاق، فقدان واضح للشغف أو الاهتمام بالقيام بالواجبات أو الأنشطة اليومية، تغير في الشهية أو الوزن، صعوبة في النوم أو زيادة في عدد ساعات النوم، الشعور بالخمول الذهني أو الحركي، الشعور بفقدان القيمة الذاتية أو تأنيب ضمير مبالغ فيه، صعوبة في التركيز أو اتخاذ القرارات، وجود أفكار متكررة تتعلق بتمني الموت أو التفكير بالانتحار. اذكر الأعراض التي عانيت منها بالتفصيل وكيف أثرت عليك؟",
    "هل أدت الأعراض التي مررت بها إلى شعورك بضيق نفسي شديد أو إلى تعطيل واضح لقدرتك على أداء مهامك اليومية، سواء في حياتك الاجتماعية، الوظيفية، أو الشخصية؟ كيف لاحظت تأثير ذلك عليك وعلى تفاعلاتك مع من حولك؟",
    "هل هذه الأعراض التي عانيت منها لم تكن ناتجة عن تأثير أي مواد مخدرة، أدوية معينة، أو بسبب حالة مرضية عضوية أخرى قد تكون أثرت على سلوكك أو مشاعرك خلال تلك الفترة؟",
    "هل تجد نفسك تعاني من التفكير المفرط أو القلق الزائد تجاه مختلف الأمور الحياتية المحيطة بك، سواء كانت متعلقة بالعمل، الدراسة، المنزل، أو غيرها من الجوانب اليومية؟ أعط أمثلة على بعض من هذه الأمور وكيف يؤثر التفكير والقلق بها على أفكارك وسلوكك خلال اليوم؟",
    "هل تواجه صعوبة في السيطرة على أفكارك القلقة أو التحكم في مستوى القلق الذي تشعر به، بحيث تشعر أن الأمر خارج عن إرادتك أو أنه مستمر على نحو يرهقك؟ اجعل إجابتك تفصيلية بحيث توضح كيف يكون خارج عن إرادتك أو إلى أي مدى يرهقك.",
    "هل يترافق مع التفكير المفرط أو القلق المستمر ثلاثة أعراض أو أكثر من الأعراض التالية: الشعور بعدم الارتياح أو بضغط نفسي كبير، الإحساس بالتعب والإرهاق بسهولة، صعوبة واضحة في التركيز، الشعور بالعصبية الزائدة، شد عضلي مزمن، اضطرابات في النوم، وغيرها؟ اذكر كل عرض تعاني منه وهل يؤثر على مهامك اليومية مثل العمل أو الدراسة أو حياتك الاجتماعية؟ وكيف يؤثر عليك بشكل يومي؟",
];
