//! Seed corpus written when the document directory does not exist.
//!
//! A convenience default so a fresh install can answer something
//! immediately. Deployments with real content point `[documents].dir` at
//! their own files and never hit this path.

use std::io;
use std::path::Path;

const LEAVE_POLICY: &str = "\
COMPANY LEAVE POLICY

Annual Leave:
- Employees are entitled to 20 days of annual leave
- Leave should be requested 2 weeks in advance
- Public holidays are additional to annual leave
- Work-from-home is allowed up to 2 days per week
";

const CODE_OF_CONDUCT: &str = "\
CODE OF CONDUCT

Employees must:
1. Maintain professional conduct at all times
2. Report conflicts of interest
3. Protect company information
4. Treat all colleagues with respect
5. Follow safety procedures
";

const PRODUCT_FEATURES: &str = "\
PRODUCT FEATURES

Our question-answering service provides:
- Document retrieval and indexing
- Natural language question answering
- Multi-session conversation support
- Azure OpenAI integration
- HTTP API access
";

pub(crate) const SEED_DOCUMENTS: &[(&str, &str)] = &[
    ("company_policy_leave.txt", LEAVE_POLICY),
    ("company_policy_code_conduct.txt", CODE_OF_CONDUCT),
    ("company_product_features.txt", PRODUCT_FEATURES),
];

/// Create `dir` and write the seed files into it.
pub(crate) fn write_seed_documents(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    for (filename, content) in SEED_DOCUMENTS {
        std::fs::write(dir.join(filename), content)?;
    }
    Ok(())
}
